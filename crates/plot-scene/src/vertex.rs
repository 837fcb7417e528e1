//! GPU-facing vertex record.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// A single vertex as uploaded to the GPU: position followed by color.
///
/// The field order and offsets are a wire contract with the renderer's
/// vertex-layout descriptor (position as 3 floats at offset 0, color as
/// 4 floats immediately after). Do not reorder or pad.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl Vertex {
    /// Default vertex color (opaque white).
    pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

    /// Creates a vertex with an explicit color.
    pub fn new(position: Vec3, color: [f32; 4]) -> Self {
        Self {
            position: position.to_array(),
            color,
        }
    }

    /// Creates a white vertex at the given position.
    pub fn from_position(position: Vec3) -> Self {
        Self::new(position, Self::WHITE)
    }

    /// Returns the position as a vector.
    pub fn position(&self) -> Vec3 {
        Vec3::from(self.position)
    }

    /// Returns this vertex with its position transformed homogeneously
    /// (w = 1). The color is untouched.
    pub fn transformed(&self, transform: &Mat4) -> Self {
        Self {
            position: transform.transform_point3(self.position()).to_array(),
            color: self.color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_matches_wire_contract() {
        // position @ 0 (3 floats), color @ 12 (4 floats), stride 28
        assert_eq!(std::mem::size_of::<Vertex>(), 28);

        let v = Vertex::new(Vec3::new(1.0, 2.0, 3.0), [0.1, 0.2, 0.3, 0.4]);
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&v));
        assert_eq!(floats, &[1.0, 2.0, 3.0, 0.1, 0.2, 0.3, 0.4]);
    }

    #[test]
    fn transform_moves_position_only() {
        let v = Vertex::new(Vec3::new(1.0, 0.0, 0.0), [0.0, 0.0, 1.0, 1.0]);
        let moved = v.transformed(&Mat4::from_translation(Vec3::new(0.0, 2.0, 0.0)));

        assert_eq!(moved.position(), Vec3::new(1.0, 2.0, 0.0));
        assert_eq!(moved.color, v.color);
    }
}
