//! Pipeline descriptors and selection.

use serde::{Deserialize, Serialize};

use crate::node::NodeKind;

/// A GPU rendering configuration, identified by its shader function
/// names. Value-equal and hashable: this is the batching key, so nodes
/// with structurally equal descriptors land in the same render group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PipelineDescriptor {
    /// Name of the vertex shader entry point.
    pub vertex_function: String,
    /// Name of the fragment shader entry point.
    pub fragment_function: String,
}

impl PipelineDescriptor {
    /// Creates a descriptor from explicit function names.
    pub fn new(vertex_function: impl Into<String>, fragment_function: impl Into<String>) -> Self {
        Self {
            vertex_function: vertex_function.into(),
            fragment_function: fragment_function.into(),
        }
    }

    /// The shared configuration all plot shapes render with.
    pub fn plot() -> Self {
        Self::new("plot_vertex_shader", "plot_fragment_shader")
    }

    /// Fallback configuration for node variants without a dedicated
    /// pipeline. Its function names are not part of the plot shader
    /// library, so groups keyed by it fail pipeline creation and are
    /// dropped at render time.
    pub fn fallback() -> Self {
        Self::new("default_vertex", "default_fragment")
    }
}

/// Selects the pipeline configuration for a node variant.
///
/// Pure and total over the closed variant set. Every current shape maps
/// to the shared plot configuration; [`PipelineDescriptor::fallback`]
/// stands ready for variants added without a pipeline mapping.
pub fn select_pipeline(kind: &NodeKind) -> PipelineDescriptor {
    match kind {
        NodeKind::SceneRoot
        | NodeKind::Plane { .. }
        | NodeKind::Line2d { .. }
        | NodeKind::Line3d { .. }
        | NodeKind::Sphere { .. }
        | NodeKind::Cone { .. }
        | NodeKind::Cylinder { .. }
        | NodeKind::VectorArrow { .. } => PipelineDescriptor::plot(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;
    use glam::{Vec2, Vec3};

    #[test]
    fn all_shapes_share_the_plot_pipeline() {
        let nodes = [
            Node::plane(Vec3::Z, Vec3::ZERO, 1.0),
            Node::line2d(Vec2::ZERO, Vec2::ONE),
            Node::line3d(Vec3::ZERO, Vec3::ONE),
            Node::sphere(Vec3::ZERO, 1.0, 4, 2),
            Node::cone(Vec3::ZERO, Vec3::Z, 0.5, 6),
            Node::cylinder(Vec3::ZERO, Vec3::Z, 0.5, 5),
            Node::vector_arrow(Vec3::ZERO, Vec3::X, 0.02, None, None, 8),
        ];

        for node in &nodes {
            assert_eq!(select_pipeline(node.kind()), PipelineDescriptor::plot());
        }
    }

    #[test]
    fn descriptors_compare_structurally() {
        assert_eq!(
            PipelineDescriptor::new("plot_vertex_shader", "plot_fragment_shader"),
            PipelineDescriptor::plot()
        );
        assert_ne!(PipelineDescriptor::plot(), PipelineDescriptor::fallback());
    }
}
