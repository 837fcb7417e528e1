//! Object-space vertex generation for the shape variants.
//!
//! Everything here is pure: output depends only on the shape parameters,
//! never on a node's world transform. Keeping the numeric recipes stable
//! keeps compiled output reproducible across runs.

use std::f32::consts::PI;

use glam::Vec3;

use crate::vertex::Vertex;

const PLANE_COLOR: [f32; 4] = [0.0, 0.0, 1.0, 1.0];

/// Two unit vectors orthogonal to `axis` (assumed normalized).
///
/// The first is derived from world-X unless the axis is nearly parallel
/// to it (|x| >= 0.9), in which case world-Y is used to avoid a
/// degenerate cross product.
fn orthonormal_basis(axis: Vec3) -> (Vec3, Vec3) {
    let u = if axis.x.abs() < 0.9 {
        axis.cross(Vec3::X).normalize()
    } else {
        axis.cross(Vec3::Y).normalize()
    };
    let v = axis.cross(u);
    (u, v)
}

/// A square of side `size` centered at `offset`, facing `normal`.
/// Two triangles, 6 vertices.
pub(crate) fn plane_vertices(normal: Vec3, offset: Vec3, size: f32) -> Vec<Vertex> {
    let (u, v) = orthonormal_basis(normal);
    let half = size * 0.5;

    let corners = [
        offset + half * (-u - v), // bottom-left
        offset + half * (u - v),  // bottom-right
        offset + half * (u + v),  // top-right
        offset + half * (-u + v), // top-left
    ];

    [
        corners[0], corners[1], corners[3], // first triangle
        corners[1], corners[2], corners[3], // second triangle
    ]
    .iter()
    .map(|&p| Vertex::new(p, PLANE_COLOR))
    .collect()
}

/// A 2D segment on the z = 0 plane. 2 vertices.
pub(crate) fn line2d_vertices(from: glam::Vec2, to: glam::Vec2) -> Vec<Vertex> {
    vec![
        Vertex::from_position(from.extend(0.0)),
        Vertex::from_position(to.extend(0.0)),
    ]
}

/// A 3D segment. 2 vertices.
pub(crate) fn line3d_vertices(from: Vec3, to: Vec3) -> Vec<Vertex> {
    vec![Vertex::from_position(from), Vertex::from_position(to)]
}

/// A latitude/longitude sphere: `(rings + 1) x (segments + 1)` grid
/// points, each grid cell triangulated into two triangles.
/// `rings * segments * 6` vertices.
pub(crate) fn sphere_vertices(center: Vec3, radius: f32, segments: u32, rings: u32) -> Vec<Vertex> {
    let segments = segments as usize;
    let rings = rings as usize;

    let mut grid = Vec::with_capacity((rings + 1) * (segments + 1));
    for ring in 0..=rings {
        let phi = ring as f32 * PI / rings as f32;
        let y = phi.cos();
        let ring_radius = phi.sin();

        for segment in 0..=segments {
            let theta = segment as f32 * 2.0 * PI / segments as f32;
            let x = ring_radius * theta.cos();
            let z = ring_radius * theta.sin();

            grid.push(center + radius * Vec3::new(x, y, z));
        }
    }

    let mut vertices = Vec::with_capacity(rings * segments * 6);
    for ring in 0..rings {
        for segment in 0..segments {
            let current = ring * (segments + 1) + segment;
            let next = current + segments + 1;

            vertices.push(Vertex::from_position(grid[current]));
            vertices.push(Vertex::from_position(grid[next]));
            vertices.push(Vertex::from_position(grid[current + 1]));

            vertices.push(Vertex::from_position(grid[current + 1]));
            vertices.push(Vertex::from_position(grid[next]));
            vertices.push(Vertex::from_position(grid[next + 1]));
        }
    }

    vertices
}

/// A cone from a base circle to a tip: `segments` side triangles plus a
/// `segments`-triangle base fan. `segments * 6` vertices.
pub(crate) fn cone_vertices(base: Vec3, tip: Vec3, radius: f32, segments: u32) -> Vec<Vertex> {
    let segments = segments as usize;
    let axis = (tip - base).normalize();
    let (p1, p2) = orthonormal_basis(axis);

    let circle: Vec<Vec3> = (0..segments)
        .map(|i| {
            let angle = i as f32 * 2.0 * PI / segments as f32;
            base + radius * (angle.cos() * p1 + angle.sin() * p2)
        })
        .collect();

    let mut vertices = Vec::with_capacity(segments * 6);

    // Side triangles from each base edge to the tip.
    for i in 0..segments {
        let next = (i + 1) % segments;
        vertices.push(Vertex::from_position(circle[i]));
        vertices.push(Vertex::from_position(circle[next]));
        vertices.push(Vertex::from_position(tip));
    }

    // Base fan.
    for i in 0..segments {
        let next = (i + 1) % segments;
        vertices.push(Vertex::from_position(base));
        vertices.push(Vertex::from_position(circle[next]));
        vertices.push(Vertex::from_position(circle[i]));
    }

    vertices
}

/// A cylinder between two circles: two side triangles per segment plus a
/// base fan and a top fan. `segments * 12` vertices.
pub(crate) fn cylinder_vertices(base: Vec3, top: Vec3, radius: f32, segments: u32) -> Vec<Vertex> {
    let segments = segments as usize;
    let axis = (top - base).normalize();
    let (p1, p2) = orthonormal_basis(axis);

    let mut base_circle = Vec::with_capacity(segments);
    let mut top_circle = Vec::with_capacity(segments);
    for i in 0..segments {
        let angle = i as f32 * 2.0 * PI / segments as f32;
        let offset = radius * (angle.cos() * p1 + angle.sin() * p2);
        base_circle.push(base + offset);
        top_circle.push(top + offset);
    }

    let mut vertices = Vec::with_capacity(segments * 12);

    // Side quads, two triangles each.
    for i in 0..segments {
        let next = (i + 1) % segments;

        vertices.push(Vertex::from_position(base_circle[i]));
        vertices.push(Vertex::from_position(top_circle[i]));
        vertices.push(Vertex::from_position(base_circle[next]));

        vertices.push(Vertex::from_position(base_circle[next]));
        vertices.push(Vertex::from_position(top_circle[i]));
        vertices.push(Vertex::from_position(top_circle[next]));
    }

    // Base fan (wound for an inward-facing normal).
    for i in 0..segments {
        let next = (i + 1) % segments;
        vertices.push(Vertex::from_position(base));
        vertices.push(Vertex::from_position(base_circle[next]));
        vertices.push(Vertex::from_position(base_circle[i]));
    }

    // Top fan (wound for an outward-facing normal).
    for i in 0..segments {
        let next = (i + 1) % segments;
        vertices.push(Vertex::from_position(top));
        vertices.push(Vertex::from_position(top_circle[i]));
        vertices.push(Vertex::from_position(top_circle[next]));
    }

    vertices
}
