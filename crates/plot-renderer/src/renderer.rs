//! Scene renderer: turns a compiled scene into GPU resources once, then
//! draws it every frame with one vertex-buffer bind per render group.

use std::collections::HashMap;

use wgpu::util::DeviceExt;

use plot_scene::{CompiledScene, PipelineDescriptor, PrimitiveKind, RenderGroupId};

use crate::error::RendererError;
use crate::pipeline::create_render_pipeline;
use crate::shader::ShaderLibrary;

/// Pipeline variants for one descriptor, one per primitive kind the
/// scene actually uses.
#[derive(Default)]
struct PipelineSet {
    triangle: Option<wgpu::RenderPipeline>,
    line: Option<wgpu::RenderPipeline>,
}

impl PipelineSet {
    fn get(&self, kind: PrimitiveKind) -> Option<&wgpu::RenderPipeline> {
        match kind {
            PrimitiveKind::Triangle => self.triangle.as_ref(),
            PrimitiveKind::Line => self.line.as_ref(),
        }
    }

    fn slot_mut(&mut self, kind: PrimitiveKind) -> &mut Option<wgpu::RenderPipeline> {
        match kind {
            PrimitiveKind::Triangle => &mut self.triangle,
            PrimitiveKind::Line => &mut self.line,
        }
    }
}

/// A render group that failed GPU preparation and was dropped from
/// rendering. Other groups proceed.
#[derive(Debug)]
pub struct GroupFailure {
    pub group: RenderGroupId,
    pub error: RendererError,
}

/// Renders [`CompiledScene`]s.
///
/// [`SceneRenderer::prepare`] creates one pipeline object per unique
/// pipeline configuration and uploads one vertex buffer per render
/// group; [`SceneRenderer::render`] then binds each group's buffer once
/// and issues its draw commands in stored order. Nothing is recompiled
/// or re-uploaded between frames until `prepare` is called again.
pub struct SceneRenderer {
    library: ShaderLibrary,
    target_format: wgpu::TextureFormat,
    pipelines: HashMap<PipelineDescriptor, PipelineSet>,
    buffers: HashMap<RenderGroupId, wgpu::Buffer>,
}

impl SceneRenderer {
    /// Creates a renderer targeting the given color format.
    pub fn new(device: &wgpu::Device, target_format: wgpu::TextureFormat) -> Self {
        Self {
            library: ShaderLibrary::new(device),
            target_format,
            pipelines: HashMap::new(),
            buffers: HashMap::new(),
        }
    }

    /// Creates pipelines and uploads vertex buffers for a compiled scene.
    ///
    /// A group whose pipeline cannot be created (unknown shader function)
    /// is dropped from rendering and reported in the returned list; the
    /// remaining groups still render.
    pub fn prepare(&mut self, device: &wgpu::Device, scene: &CompiledScene) -> Vec<GroupFailure> {
        self.pipelines.clear();
        self.buffers.clear();

        let mut failures = Vec::new();

        for group in scene.groups() {
            if group.is_empty() {
                continue;
            }

            if let Err(error) = self.prepare_pipelines(device, group) {
                tracing::warn!(
                    group = group.id().raw(),
                    %error,
                    "dropping render group"
                );
                failures.push(GroupFailure {
                    group: group.id(),
                    error,
                });
                continue;
            }

            let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Plot Vertex Buffer"),
                contents: bytemuck::cast_slice(group.vertices()),
                usage: wgpu::BufferUsages::VERTEX,
            });
            self.buffers.insert(group.id(), buffer);
        }

        failures
    }

    fn prepare_pipelines(
        &mut self,
        device: &wgpu::Device,
        group: &plot_scene::RenderGroup,
    ) -> Result<(), RendererError> {
        let set = self.pipelines.entry(group.pipeline().clone()).or_default();

        for command in group.draw_commands() {
            let slot = set.slot_mut(command.primitive);
            if slot.is_some() {
                continue;
            }
            *slot = Some(create_render_pipeline(
                device,
                &self.library,
                group.pipeline(),
                command.primitive,
                self.target_format,
            )?);
        }

        Ok(())
    }

    /// Issues the draw calls for every prepared render group.
    ///
    /// Per group: the vertex buffer is bound once, then the draw commands
    /// run in stored order, switching pipelines only when the primitive
    /// kind changes between consecutive commands.
    pub fn render<'a>(&'a self, pass: &mut wgpu::RenderPass<'a>, scene: &CompiledScene) {
        for group in scene.groups() {
            let Some(buffer) = self.buffers.get(&group.id()) else {
                continue; // dropped or empty group
            };
            let Some(set) = self.pipelines.get(group.pipeline()) else {
                continue;
            };

            pass.set_vertex_buffer(0, buffer.slice(..));

            let mut bound = None;
            for command in group.draw_commands() {
                if bound != Some(command.primitive) {
                    let Some(pipeline) = set.get(command.primitive) else {
                        continue;
                    };
                    pass.set_pipeline(pipeline);
                    bound = Some(command.primitive);
                }
                pass.draw(command.vertex_range(), 0..1);
            }
        }
    }
}
