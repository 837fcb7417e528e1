//! Declarative plot scenes compiled into GPU-ready render batches.
//!
//! A caller builds a tree of shape [`Node`]s (planes, lines, spheres,
//! cones, cylinders, composite arrows), and the [`SceneCompiler`] turns
//! it into a [`CompiledScene`]: per-pipeline [`RenderGroup`]s holding one
//! vertex buffer and an ordered list of draw commands each. A renderer
//! consumes the compiled scene with one pipeline/buffer bind per group.
//!
//! This crate is pure data; no GPU types appear anywhere in it.

pub mod cache;
pub mod compiler;
pub mod group;
pub mod node;
pub mod pipeline;
pub mod transforms;
pub mod vertex;
pub mod visitor;

pub use cache::PlotScene;
pub use compiler::SceneCompiler;
pub use group::{CompiledScene, DrawCommand, PrimitiveKind, RenderGroup, RenderGroupId};
pub use node::{Node, NodeKind, VertexStorageError, VertexStore};
pub use pipeline::{PipelineDescriptor, select_pipeline};
pub use transforms::PlaneRotation;
pub use vertex::Vertex;
pub use visitor::NodeVisitor;
