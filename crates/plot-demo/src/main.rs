//! Plot demo entry point.
//!
//! Builds the reference scene (coordinate axes with sphere/cone end
//! markers, two tilted planes, one vector arrow), compiles it, logs the
//! resulting batches, and renders one frame into an offscreen texture
//! when a GPU adapter is available.

use std::f32::consts::FRAC_PI_4;

use glam::{Vec3, vec3};

use plot_renderer::SceneRenderer;
use plot_scene::{Node, PlaneRotation, PlotScene, SceneCompiler};

const FRAME_WIDTH: u32 = 800;
const FRAME_HEIGHT: u32 = 600;

fn demo_scene() -> Node {
    Node::root(vec![
        // A plane pair in 3D space
        Node::plane(vec3(1.0, 1.0, 1.0), vec3(0.1, 0.1, 0.1), 1.0),
        Node::plane(vec3(1.0, 1.0, 1.0), vec3(-0.1, -0.1, -0.1), 1.0),
        // 3D coordinate axes
        Node::line3d(vec3(-0.8, 0.0, 0.0), vec3(0.8, 0.0, 0.0)),
        Node::line3d(vec3(0.0, -0.8, 0.0), vec3(0.0, 0.8, 0.0)),
        Node::line3d(vec3(0.0, 0.0, -0.8), vec3(0.0, 0.0, 0.8)),
        // Spheres at the positive ends of the axes
        Node::sphere(vec3(0.8, 0.0, 0.0), 0.05, 16, 8),
        Node::sphere(vec3(0.0, 0.8, 0.0), 0.05, 16, 8),
        Node::sphere(vec3(0.0, 0.0, 0.8), 0.05, 16, 8),
        // Cones at the negative ends
        Node::cone(vec3(-0.85, 0.0, 0.0), vec3(-0.8, 0.0, 0.0), 0.04, 12),
        Node::cone(vec3(0.0, -0.85, 0.0), vec3(0.0, -0.8, 0.0), 0.04, 12),
        Node::cone(vec3(0.0, 0.0, -0.85), vec3(0.0, 0.0, -0.8), 0.04, 12),
        // A diagonal vector arrow
        Node::vector_arrow(
            vec3(-0.5, -0.5, -0.5),
            vec3(0.5, 0.7, 0.3),
            0.02,
            None,
            None,
            12,
        ),
    ])
}

fn main() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "plot_demo=debug,plot_scene=debug,plot_renderer=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting plot demo");

    let compiler = SceneCompiler::new().with_transform(PlaneRotation::new(FRAC_PI_4, Vec3::Z));
    let mut plot = PlotScene::with_compiler(demo_scene(), compiler);

    let scene = plot.compiled();
    for group in scene.groups() {
        tracing::info!(
            group = group.id().raw(),
            vertex_function = %group.pipeline().vertex_function,
            vertices = group.vertex_count(),
            draw_commands = group.draw_commands().len(),
            "compiled render group"
        );
    }

    render_offscreen(scene);
}

fn render_offscreen(scene: &plot_scene::CompiledScene) {
    let instance = wgpu::Instance::new(wgpu::InstanceDescriptor::default());

    let Some(adapter) = pollster::block_on(instance.request_adapter(
        &wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::LowPower,
            compatible_surface: None,
            force_fallback_adapter: false,
        },
    )) else {
        tracing::info!("No GPU adapter available, skipping offscreen render");
        return;
    };

    let (device, queue) = match pollster::block_on(adapter.request_device(
        &wgpu::DeviceDescriptor {
            label: Some("plot-demo device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::downlevel_defaults(),
            memory_hints: wgpu::MemoryHints::default(),
        },
        None,
    )) {
        Ok(pair) => pair,
        Err(error) => {
            tracing::error!(%error, "Failed to create GPU device");
            return;
        }
    };

    let format = wgpu::TextureFormat::Rgba8UnormSrgb;
    let mut renderer = SceneRenderer::new(&device, format);

    let failures = renderer.prepare(&device, scene);
    for failure in &failures {
        tracing::warn!(group = failure.group.raw(), error = %failure.error, "render group dropped");
    }

    let target = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Plot Frame Target"),
        size: wgpu::Extent3d {
            width: FRAME_WIDTH,
            height: FRAME_HEIGHT,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    let view = target.create_view(&wgpu::TextureViewDescriptor::default());

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("Plot Frame Encoder"),
    });

    {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Plot Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &view,
                resolve_target: None,
                ops: wgpu::Operations {
                    // Dark blue background for 3D plots
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: 0.05,
                        g: 0.05,
                        b: 0.1,
                        a: 1.0,
                    }),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        renderer.render(&mut pass, scene);
    }

    queue.submit(std::iter::once(encoder.finish()));
    device.poll(wgpu::Maintain::Wait);

    tracing::info!(
        width = FRAME_WIDTH,
        height = FRAME_HEIGHT,
        "Rendered one frame offscreen"
    );
}
