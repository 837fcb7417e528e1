//! Visitor dispatch over the node variant set.
//!
//! A visitor implements one method per variant; every per-variant method
//! defaults to the generic [`NodeVisitor::visit_node`] fallback, which is
//! a no-op. Visitors that treat all variants uniformly (collectors, group
//! assignment) override only the fallback.

use crate::node::{Node, NodeKind};

/// An operation dispatched per node variant.
pub trait NodeVisitor {
    /// Generic fallback, invoked by every per-variant method that is not
    /// overridden. Default: no-op.
    fn visit_node(&mut self, node: &mut Node) {
        let _ = node;
    }

    fn visit_plane(&mut self, node: &mut Node) {
        self.visit_node(node);
    }

    fn visit_line2d(&mut self, node: &mut Node) {
        self.visit_node(node);
    }

    fn visit_line3d(&mut self, node: &mut Node) {
        self.visit_node(node);
    }

    fn visit_sphere(&mut self, node: &mut Node) {
        self.visit_node(node);
    }

    fn visit_cone(&mut self, node: &mut Node) {
        self.visit_node(node);
    }

    fn visit_cylinder(&mut self, node: &mut Node) {
        self.visit_node(node);
    }

    fn visit_vector_arrow(&mut self, node: &mut Node) {
        self.visit_node(node);
    }

    fn visit_scene_root(&mut self, node: &mut Node) {
        self.visit_node(node);
    }
}

impl Node {
    /// Dispatches the visitor to this node's variant method, without
    /// traversing children.
    pub fn accept<V: NodeVisitor + ?Sized>(&mut self, visitor: &mut V) {
        let kind = *self.kind();
        match kind {
            NodeKind::SceneRoot => visitor.visit_scene_root(self),
            NodeKind::Plane { .. } => visitor.visit_plane(self),
            NodeKind::Line2d { .. } => visitor.visit_line2d(self),
            NodeKind::Line3d { .. } => visitor.visit_line3d(self),
            NodeKind::Sphere { .. } => visitor.visit_sphere(self),
            NodeKind::Cone { .. } => visitor.visit_cone(self),
            NodeKind::Cylinder { .. } => visitor.visit_cylinder(self),
            NodeKind::VectorArrow { .. } => visitor.visit_vector_arrow(self),
        }
    }

    /// Post-order tree traversal: visits all children first, then this
    /// node. Composite operations thereby see children before the parent
    /// synthesizes anything from them.
    pub fn visit<V: NodeVisitor + ?Sized>(&mut self, visitor: &mut V) {
        for child in self.children_mut() {
            child.visit(visitor);
        }
        self.accept(visitor);
    }

    /// Read-only post-order traversal.
    pub fn walk<F: FnMut(&Node)>(&self, f: &mut F) {
        for child in self.children() {
            child.walk(f);
        }
        f(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec2, Vec3};

    #[derive(Default)]
    struct Collector {
        names: Vec<&'static str>,
    }

    impl NodeVisitor for Collector {
        fn visit_node(&mut self, node: &mut Node) {
            self.names.push(node.kind().name());
        }
    }

    #[test]
    fn traversal_is_post_order() {
        let mut root = Node::root(vec![
            Node::plane(Vec3::Z, Vec3::ZERO, 1.0),
            Node::line2d(Vec2::ZERO, Vec2::ONE),
            Node::line3d(Vec3::ZERO, Vec3::ONE),
        ]);

        let mut collector = Collector::default();
        root.visit(&mut collector);

        assert_eq!(
            collector.names,
            vec!["Plane", "Line2d", "Line3d", "SceneRoot"]
        );
    }

    #[test]
    fn arrow_children_are_traversed() {
        let mut arrow = Node::vector_arrow(Vec3::ZERO, Vec3::X, 0.02, None, None, 8);

        let mut collector = Collector::default();
        arrow.visit(&mut collector);

        assert_eq!(collector.names, vec!["Cylinder", "Cone", "VectorArrow"]);
    }

    #[test]
    fn variant_methods_default_to_fallback() {
        // A visitor overriding only one variant leaves the rest no-ops.
        struct PlanesOnly {
            count: usize,
        }
        impl NodeVisitor for PlanesOnly {
            fn visit_plane(&mut self, _node: &mut Node) {
                self.count += 1;
            }
        }

        let mut root = Node::root(vec![
            Node::plane(Vec3::Z, Vec3::ZERO, 1.0),
            Node::sphere(Vec3::ZERO, 1.0, 4, 2),
            Node::plane(Vec3::Y, Vec3::ZERO, 2.0),
        ]);

        let mut visitor = PlanesOnly { count: 0 };
        root.visit(&mut visitor);
        assert_eq!(visitor.count, 2);
    }

    #[test]
    fn walk_matches_visit_order() {
        let root = Node::root(vec![
            Node::line3d(Vec3::ZERO, Vec3::X),
            Node::vector_arrow(Vec3::ZERO, Vec3::Y, 0.02, None, None, 4),
        ]);

        let mut names = Vec::new();
        root.walk(&mut |node| names.push(node.kind().name()));

        assert_eq!(
            names,
            vec!["Line3d", "Cylinder", "Cone", "VectorArrow", "SceneRoot"]
        );
    }
}
