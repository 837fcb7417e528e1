//! Transform visitors for the compiler's transform stage.

use glam::{Mat4, Vec3};

use crate::node::Node;
use crate::visitor::NodeVisitor;

/// Applies a fixed axis-angle rotation to every plane in the scene.
pub struct PlaneRotation {
    rotation: Mat4,
}

impl PlaneRotation {
    /// Creates a rotation of `angle` radians about `axis`.
    pub fn new(angle: f32, axis: Vec3) -> Self {
        Self {
            rotation: Mat4::from_axis_angle(axis.normalize(), angle),
        }
    }
}

impl NodeVisitor for PlaneRotation {
    fn visit_plane(&mut self, node: &mut Node) {
        node.apply_transform(self.rotation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn rotates_planes_only() {
        let mut root = Node::root(vec![
            Node::plane(Vec3::Y, Vec3::ZERO, 1.0),
            Node::line3d(Vec3::ZERO, Vec3::X),
        ]);

        let mut rotation = PlaneRotation::new(FRAC_PI_2, Vec3::Z);
        root.visit(&mut rotation);

        let plane = &root.children()[0];
        let line = &root.children()[1];

        // A quarter turn about +Z maps +X to +Y.
        let moved = plane.world_transform().transform_point3(Vec3::X);
        assert_relative_eq!((moved - Vec3::Y).length(), 0.0, epsilon = 1e-6);

        assert_eq!(line.world_transform(), Mat4::IDENTITY);
    }
}
