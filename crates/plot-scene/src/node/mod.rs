//! The declarative scene tree.
//!
//! A scene is a tree of [`Node`]s: shape leaves (planes, lines, spheres,
//! cones, cylinders), the composite [`NodeKind::VectorArrow`], and the
//! [`NodeKind::SceneRoot`] container. Nodes carry the state the compiler
//! progressively fills in: an accumulated world transform, a write-once
//! vertex store, and a render-group stamp.

mod mesh;
mod store;

pub use store::{VertexStore, VertexStorageError};

use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::group::{PrimitiveKind, RenderGroupId};
use crate::vertex::Vertex;

/// Shape parameters for each node variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    /// Pure container holding the top-level nodes of a scene.
    SceneRoot,

    /// A square of side `size` centered at `offset`, facing `normal`.
    Plane {
        /// Facing direction (stored normalized).
        normal: Vec3,
        /// Center of the square.
        offset: Vec3,
        /// Side length.
        size: f32,
    },

    /// A 2D segment on the z = 0 plane.
    Line2d { from: Vec2, to: Vec2 },

    /// A 3D segment.
    Line3d { from: Vec3, to: Vec3 },

    /// A latitude/longitude tessellated sphere.
    Sphere {
        center: Vec3,
        radius: f32,
        /// Longitude subdivisions.
        segments: u32,
        /// Latitude subdivisions.
        rings: u32,
    },

    /// A cone from a base circle to a tip point.
    Cone {
        base: Vec3,
        tip: Vec3,
        radius: f32,
        segments: u32,
    },

    /// A cylinder between two circles of equal radius.
    Cylinder {
        base: Vec3,
        top: Vec3,
        radius: f32,
        segments: u32,
    },

    /// A composite arrow: a cylinder shaft capped by a cone head.
    /// The two parts are exposed as children so traversal-based stages
    /// operate on them transparently.
    VectorArrow {
        origin: Vec3,
        vector: Vec3,
        shaft_radius: f32,
        arrowhead_radius: f32,
        arrowhead_length: f32,
        segments: u32,
    },
}

impl NodeKind {
    /// Get the type name of this variant
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::SceneRoot => "SceneRoot",
            NodeKind::Plane { .. } => "Plane",
            NodeKind::Line2d { .. } => "Line2d",
            NodeKind::Line3d { .. } => "Line3d",
            NodeKind::Sphere { .. } => "Sphere",
            NodeKind::Cone { .. } => "Cone",
            NodeKind::Cylinder { .. } => "Cylinder",
            NodeKind::VectorArrow { .. } => "VectorArrow",
        }
    }

    /// True for nodes whose geometry is owned by their children.
    pub fn is_composite(&self) -> bool {
        matches!(self, NodeKind::SceneRoot | NodeKind::VectorArrow { .. })
    }
}

/// One element of the scene tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    kind: NodeKind,
    children: Vec<Node>,

    /// Accumulated world transform; `None` means identity.
    world_transform: Option<Mat4>,

    /// Vertex storage, filled in by the compiler.
    #[serde(skip)]
    store: VertexStore,

    /// Render group stamp, assigned by the compiler.
    #[serde(skip)]
    render_group: Option<RenderGroupId>,
}

impl Node {
    fn leaf(kind: NodeKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
            world_transform: None,
            store: VertexStore::default(),
            render_group: None,
        }
    }

    /// Creates a scene root holding the given top-level nodes.
    pub fn root(children: Vec<Node>) -> Self {
        Self {
            children,
            ..Self::leaf(NodeKind::SceneRoot)
        }
    }

    /// Creates a plane. The normal is normalized on construction.
    pub fn plane(normal: Vec3, offset: Vec3, size: f32) -> Self {
        Self::leaf(NodeKind::Plane {
            normal: normal.normalize(),
            offset,
            size,
        })
    }

    /// Creates a 2D line segment.
    pub fn line2d(from: Vec2, to: Vec2) -> Self {
        Self::leaf(NodeKind::Line2d { from, to })
    }

    /// Creates a 3D line segment.
    pub fn line3d(from: Vec3, to: Vec3) -> Self {
        Self::leaf(NodeKind::Line3d { from, to })
    }

    /// Creates a sphere.
    pub fn sphere(center: Vec3, radius: f32, segments: u32, rings: u32) -> Self {
        Self::leaf(NodeKind::Sphere {
            center,
            radius,
            segments,
            rings,
        })
    }

    /// Creates a cone.
    pub fn cone(base: Vec3, tip: Vec3, radius: f32, segments: u32) -> Self {
        Self::leaf(NodeKind::Cone {
            base,
            tip,
            radius,
            segments,
        })
    }

    /// Creates a cylinder.
    pub fn cylinder(base: Vec3, top: Vec3, radius: f32, segments: u32) -> Self {
        Self::leaf(NodeKind::Cylinder {
            base,
            top,
            radius,
            segments,
        })
    }

    /// Creates a composite arrow from `origin` along `vector`.
    ///
    /// The arrowhead radius defaults to `2 * shaft_radius` and its length
    /// to `5 * shaft_radius`; the head never exceeds 30% of the vector's
    /// length. The shaft cylinder and head cone are built here and exposed
    /// as the node's children.
    pub fn vector_arrow(
        origin: Vec3,
        vector: Vec3,
        shaft_radius: f32,
        arrowhead_radius: Option<f32>,
        arrowhead_length: Option<f32>,
        segments: u32,
    ) -> Self {
        let arrowhead_radius = arrowhead_radius.unwrap_or(shaft_radius * 2.0);
        let arrowhead_length = arrowhead_length.unwrap_or(shaft_radius * 5.0);

        let vector_length = vector.length();
        let effective_length = arrowhead_length.min(vector_length * 0.3);
        let shaft_ratio = ((vector_length - effective_length) / vector_length).max(0.0);
        let shaft_end = origin + vector * shaft_ratio;

        let shaft = Self::cylinder(origin, shaft_end, shaft_radius, segments);
        let head = Self::cone(shaft_end, origin + vector, arrowhead_radius, segments);

        Self {
            children: vec![shaft, head],
            ..Self::leaf(NodeKind::VectorArrow {
                origin,
                vector,
                shaft_radius,
                arrowhead_radius,
                arrowhead_length,
                segments,
            })
        }
    }

    /// Returns the shape parameters.
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Returns the child nodes, in order.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut [Node] {
        &mut self.children
    }

    /// Composes a transform onto this node's accumulated world transform
    /// (right-multiplication; repeated calls accumulate in call order).
    ///
    /// A [`NodeKind::VectorArrow`] forwards the same transform to both of
    /// its parts in addition to storing it on itself. Plain containers do
    /// not propagate to their children.
    pub fn apply_transform(&mut self, transform: Mat4) {
        let current = self.world_transform.unwrap_or(Mat4::IDENTITY);
        self.world_transform = Some(current * transform);

        if matches!(self.kind, NodeKind::VectorArrow { .. }) {
            for child in &mut self.children {
                child.apply_transform(transform);
            }
        }
    }

    /// Returns the accumulated world transform (identity if none was applied).
    pub fn world_transform(&self) -> Mat4 {
        self.world_transform.unwrap_or(Mat4::IDENTITY)
    }

    /// Generates this node's object-space vertices.
    ///
    /// Pure and deterministic: computed from the shape parameters only,
    /// never from the world transform. A composite arrow concatenates its
    /// two parts; a scene root generates nothing.
    pub fn generate_vertices(&self) -> Vec<Vertex> {
        match self.kind {
            NodeKind::SceneRoot => Vec::new(),
            NodeKind::Plane {
                normal,
                offset,
                size,
            } => mesh::plane_vertices(normal, offset, size),
            NodeKind::Line2d { from, to } => mesh::line2d_vertices(from, to),
            NodeKind::Line3d { from, to } => mesh::line3d_vertices(from, to),
            NodeKind::Sphere {
                center,
                radius,
                segments,
                rings,
            } => mesh::sphere_vertices(center, radius, segments, rings),
            NodeKind::Cone {
                base,
                tip,
                radius,
                segments,
            } => mesh::cone_vertices(base, tip, radius, segments),
            NodeKind::Cylinder {
                base,
                top,
                radius,
                segments,
            } => mesh::cylinder_vertices(base, top, radius, segments),
            NodeKind::VectorArrow { .. } => self
                .children
                .iter()
                .flat_map(|child| child.generate_vertices())
                .collect(),
        }
    }

    /// Returns the closed-form vertex count for this node's geometry.
    pub fn vertex_count(&self) -> u32 {
        match self.kind {
            NodeKind::SceneRoot => 0,
            NodeKind::Plane { .. } => 6,
            NodeKind::Line2d { .. } | NodeKind::Line3d { .. } => 2,
            NodeKind::Sphere {
                segments, rings, ..
            } => rings * segments * 6,
            NodeKind::Cone { segments, .. } => segments * 6,
            NodeKind::Cylinder { segments, .. } => segments * 12,
            NodeKind::VectorArrow { .. } => {
                self.children.iter().map(Node::vertex_count).sum()
            }
        }
    }

    /// Returns the primitive kind this node's vertices are drawn with.
    pub fn primitive_kind(&self) -> PrimitiveKind {
        match self.kind {
            NodeKind::Line2d { .. } | NodeKind::Line3d { .. } => PrimitiveKind::Line,
            _ => PrimitiveKind::Triangle,
        }
    }

    /// Commits generated vertices to the write-once store.
    pub fn set_vertices(&mut self, vertices: Vec<Vertex>) -> Result<(), VertexStorageError> {
        self.store.set(vertices)
    }

    /// Returns the stored vertices, if any have been committed.
    pub fn vertices(&self) -> Option<&[Vertex]> {
        self.store.vertices()
    }

    /// Returns true once vertices have been committed.
    pub fn has_vertices(&self) -> bool {
        self.store.is_set()
    }

    pub(crate) fn store(&self) -> &VertexStore {
        &self.store
    }

    /// Bakes a transform into the stored vertex positions; see
    /// [`VertexStore::place`].
    pub fn place_vertices(&mut self, transform: &Mat4) -> Result<(), VertexStorageError> {
        self.store.place(transform)
    }

    /// Returns the render group this node was assigned to, if compiled.
    pub fn render_group(&self) -> Option<RenderGroupId> {
        self.render_group
    }

    pub(crate) fn set_render_group(&mut self, id: RenderGroupId) {
        self.render_group = Some(id);
    }
}
