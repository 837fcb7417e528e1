//! Render pipeline construction for pipeline descriptors.

use plot_scene::{PipelineDescriptor, PrimitiveKind};

use crate::error::RendererError;
use crate::shader::ShaderLibrary;
use crate::vertex::vertex_buffer_layout;

/// Maps a draw-command primitive kind to its wgpu topology.
///
/// wgpu fixes topology at pipeline creation, so each primitive kind a
/// group uses gets its own pipeline variant for the same descriptor.
pub fn primitive_topology(kind: PrimitiveKind) -> wgpu::PrimitiveTopology {
    match kind {
        PrimitiveKind::Triangle => wgpu::PrimitiveTopology::TriangleList,
        PrimitiveKind::Line => wgpu::PrimitiveTopology::LineList,
    }
}

/// Builds the render pipeline for one `(descriptor, primitive kind)`
/// pair, resolving both shader function names through the library first.
pub fn create_render_pipeline(
    device: &wgpu::Device,
    library: &ShaderLibrary,
    descriptor: &PipelineDescriptor,
    kind: PrimitiveKind,
    format: wgpu::TextureFormat,
) -> Result<wgpu::RenderPipeline, RendererError> {
    let vertex_module = library.function(&descriptor.vertex_function)?;
    let fragment_module = library.function(&descriptor.fragment_function)?;

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Plot Pipeline Layout"),
        bind_group_layouts: &[],
        push_constant_ranges: &[],
    });

    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Plot Pipeline"),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: vertex_module,
            entry_point: Some(&descriptor.vertex_function),
            buffers: &[vertex_buffer_layout()],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: fragment_module,
            entry_point: Some(&descriptor.fragment_function),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: primitive_topology(kind),
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    });

    Ok(pipeline)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topology_follows_primitive_kind() {
        assert_eq!(
            primitive_topology(PrimitiveKind::Triangle),
            wgpu::PrimitiveTopology::TriangleList
        );
        assert_eq!(
            primitive_topology(PrimitiveKind::Line),
            wgpu::PrimitiveTopology::LineList
        );
    }
}
