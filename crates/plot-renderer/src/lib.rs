//! wgpu renderer for compiled plot scenes.
//!
//! Consumes a [`plot_scene::CompiledScene`] and a GPU device: pipelines
//! are created once per unique pipeline configuration, one vertex buffer
//! is uploaded per render group, and every frame draws each group with a
//! single buffer bind followed by its draw commands in stored order.

pub mod error;
pub mod pipeline;
pub mod renderer;
pub mod shader;
pub mod vertex;

pub use error::RendererError;
pub use renderer::{GroupFailure, SceneRenderer};
pub use shader::ShaderLibrary;
