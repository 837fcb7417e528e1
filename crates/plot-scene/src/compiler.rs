//! The scene compiler.
//!
//! Turns a node tree into a [`CompiledScene`] through five strictly
//! sequential stages:
//!
//! 1. transform: run the configured transform visitors over the tree
//! 2. group assignment: batch nodes by pipeline descriptor
//! 3. vertex generation: commit object-space vertices to each leaf
//! 4. placement: bake each node's world transform into its vertices
//! 5. assembly: concatenate placed vertices into per-group buffers and
//!    emit one draw command per contributing node
//!
//! `compile` consumes the tree; re-running placement over already placed
//! vertices is therefore unrepresentable.

use std::collections::{BTreeMap, HashMap};

use crate::group::{CompiledScene, DrawCommand, RenderGroup, RenderGroupId};
use crate::node::Node;
use crate::pipeline::{PipelineDescriptor, select_pipeline};
use crate::visitor::NodeVisitor;

/// Compiles node trees into render groups.
///
/// Transform visitors are optional and run in registration order before
/// any other stage.
#[derive(Default)]
pub struct SceneCompiler {
    transforms: Vec<Box<dyn NodeVisitor>>,
}

impl SceneCompiler {
    /// Creates a compiler with no transform visitors configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a transform visitor to run during the transform stage.
    pub fn with_transform(mut self, visitor: impl NodeVisitor + 'static) -> Self {
        self.transforms.push(Box::new(visitor));
        self
    }

    /// Runs all stages over `root` and returns the compiled scene.
    pub fn compile(&mut self, mut root: Node) -> CompiledScene {
        self.transform_stage(&mut root);

        let mut groups = group_stage(&mut root);
        vertex_stage(&mut root);
        placement_stage(&mut root);
        assembly_stage(&root, &mut groups);

        tracing::debug!(
            groups = groups.len(),
            vertices = groups
                .values()
                .map(|g| g.vertices().len())
                .sum::<usize>(),
            "scene compiled"
        );

        CompiledScene { root, groups }
    }

    fn transform_stage(&mut self, root: &mut Node) {
        for visitor in &mut self.transforms {
            root.visit(visitor.as_mut());
        }
    }
}

/// Stage 2: batch nodes by pipeline descriptor.
///
/// The first node seen with a new descriptor allocates a fresh group id;
/// every drawable node is stamped with its group. Containers hold no
/// geometry of their own and are left unstamped.
struct GroupAssignment {
    by_pipeline: HashMap<PipelineDescriptor, RenderGroupId>,
    groups: BTreeMap<RenderGroupId, RenderGroup>,
    next_id: RenderGroupId,
}

impl GroupAssignment {
    fn new() -> Self {
        Self {
            by_pipeline: HashMap::new(),
            groups: BTreeMap::new(),
            next_id: RenderGroupId::first(),
        }
    }
}

impl NodeVisitor for GroupAssignment {
    fn visit_node(&mut self, node: &mut Node) {
        let pipeline = select_pipeline(node.kind());

        let id = match self.by_pipeline.get(&pipeline) {
            Some(&existing) => existing,
            None => {
                let id = self.next_id;
                self.next_id = id.next();
                self.by_pipeline.insert(pipeline.clone(), id);
                self.groups.insert(id, RenderGroup::new(id, pipeline));
                id
            }
        };

        node.set_render_group(id);
    }

    fn visit_scene_root(&mut self, _node: &mut Node) {}
}

fn group_stage(root: &mut Node) -> BTreeMap<RenderGroupId, RenderGroup> {
    let mut assignment = GroupAssignment::new();
    root.visit(&mut assignment);
    assignment.groups
}

/// Stage 3: commit object-space vertices to every leaf whose store is
/// still unset. Already populated nodes are skipped, so re-running the
/// stage is a no-op. Composites are skipped outright: their children own
/// the geometry (storing the concatenation as well would draw it twice).
struct VertexGenerator;

impl NodeVisitor for VertexGenerator {
    fn visit_node(&mut self, node: &mut Node) {
        if node.has_vertices() {
            return;
        }
        let vertices = node.generate_vertices();
        let committed = node.set_vertices(vertices);
        debug_assert!(committed.is_ok(), "store checked unset above");
    }

    fn visit_scene_root(&mut self, _node: &mut Node) {}

    fn visit_vector_arrow(&mut self, _node: &mut Node) {}
}

fn vertex_stage(root: &mut Node) {
    root.visit(&mut VertexGenerator);
}

/// Stage 4: bake each node's accumulated world transform into its stored
/// vertex positions (homogeneous, w = 1; colors untouched).
struct VertexPlacement;

impl NodeVisitor for VertexPlacement {
    fn visit_node(&mut self, node: &mut Node) {
        if !node.store().is_generated() {
            return;
        }
        let transform = node.world_transform();
        let placed = node.place_vertices(&transform);
        debug_assert!(placed.is_ok(), "store checked generated above");
    }
}

fn placement_stage(root: &mut Node) {
    root.visit(&mut VertexPlacement);
}

/// Stage 5: walk the tree post-order; each node with placed vertices
/// appends them to its group's buffer and gains one draw command. The
/// resulting command ranges exactly partition each buffer.
fn assembly_stage(root: &Node, groups: &mut BTreeMap<RenderGroupId, RenderGroup>) {
    root.walk(&mut |node| {
        let Some(id) = node.render_group() else {
            return;
        };
        let Some(vertices) = node.vertices() else {
            return;
        };
        if vertices.is_empty() {
            return;
        }
        let Some(group) = groups.get_mut(&id) else {
            return;
        };

        let vertex_start = group.vertices.len() as u32;
        group.vertices.extend_from_slice(vertices);
        group.draw_commands.push(DrawCommand {
            primitive: node.primitive_kind(),
            vertex_start,
            vertex_count: vertices.len() as u32,
        });
    });

    // Command ranges must partition each group buffer: no gaps, no overlaps.
    for group in groups.values() {
        let mut cursor = 0u32;
        for command in group.draw_commands() {
            debug_assert_eq!(command.vertex_start, cursor);
            cursor += command.vertex_count;
        }
        debug_assert_eq!(cursor, group.vertex_count());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::PrimitiveKind;
    use crate::vertex::Vertex;
    use glam::{Mat4, Vec3};

    fn plane_and_line() -> Node {
        Node::root(vec![
            Node::plane(Vec3::Z, Vec3::ZERO, 1.0),
            Node::line3d(Vec3::new(-1.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0)),
        ])
    }

    #[test]
    fn plane_and_line_share_one_group() {
        let scene = SceneCompiler::new().compile(plane_and_line());

        assert_eq!(scene.group_count(), 1);
        let group = scene.groups().next().unwrap();
        assert_eq!(group.vertex_count(), 8);

        let commands = group.draw_commands();
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[0].primitive, PrimitiveKind::Triangle);
        assert_eq!(commands[0].vertex_range(), 0..6);
        assert_eq!(commands[1].primitive, PrimitiveKind::Line);
        assert_eq!(commands[1].vertex_range(), 6..8);
    }

    #[test]
    fn equal_descriptors_share_a_group_id() {
        let scene = SceneCompiler::new().compile(plane_and_line());

        let children = scene.root().children();
        let plane_group = children[0].render_group();
        let line_group = children[1].render_group();
        assert!(plane_group.is_some());
        assert_eq!(plane_group, line_group);
    }

    #[test]
    fn scene_root_is_not_stamped() {
        let scene = SceneCompiler::new().compile(plane_and_line());
        assert_eq!(scene.root().render_group(), None);
    }

    #[test]
    fn command_ranges_partition_every_buffer() {
        let root = Node::root(vec![
            Node::sphere(Vec3::ZERO, 0.5, 8, 4),
            Node::line3d(Vec3::ZERO, Vec3::X),
            Node::cone(Vec3::ZERO, Vec3::Y, 0.2, 6),
            Node::vector_arrow(Vec3::ZERO, Vec3::Z, 0.02, None, None, 8),
        ]);
        let scene = SceneCompiler::new().compile(root);

        for group in scene.groups() {
            let mut cursor = 0;
            for command in group.draw_commands() {
                assert_eq!(command.vertex_start, cursor, "gap or overlap in ranges");
                cursor += command.vertex_count;
            }
            assert_eq!(cursor, group.vertex_count());
        }
    }

    #[test]
    fn arrow_children_carry_the_geometry() {
        let root = Node::root(vec![Node::vector_arrow(
            Vec3::ZERO,
            Vec3::X,
            0.02,
            None,
            None,
            8,
        )]);
        let scene = SceneCompiler::new().compile(root);

        assert_eq!(scene.group_count(), 1);
        let group = scene.groups().next().unwrap();
        // Shaft (8 * 12) and head (8 * 6) draw; the composite itself
        // contributes no duplicate copy.
        assert_eq!(group.vertex_count(), 144);
        let counts: Vec<u32> = group
            .draw_commands()
            .iter()
            .map(|c| c.vertex_count)
            .collect();
        assert_eq!(counts, vec![96, 48]);
    }

    #[test]
    fn generation_stage_skips_populated_nodes() {
        let sentinel = Vertex::from_position(Vec3::new(9.0, 9.0, 9.0));
        let mut line = Node::line3d(Vec3::ZERO, Vec3::X);
        line.set_vertices(vec![sentinel]).unwrap();

        let scene = SceneCompiler::new().compile(Node::root(vec![line]));

        let group = scene.groups().next().unwrap();
        assert_eq!(group.vertices(), &[sentinel]);
    }

    #[test]
    fn configured_transforms_move_placed_vertices() {
        struct Shift(Mat4);
        impl NodeVisitor for Shift {
            fn visit_line3d(&mut self, node: &mut Node) {
                node.apply_transform(self.0);
            }
        }

        let shift = Mat4::from_translation(Vec3::new(0.0, 1.0, 0.0));
        let mut compiler = SceneCompiler::new().with_transform(Shift(shift));
        let scene = compiler.compile(Node::root(vec![Node::line3d(Vec3::ZERO, Vec3::X)]));

        let group = scene.groups().next().unwrap();
        assert_eq!(group.vertices()[0].position(), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(group.vertices()[1].position(), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn scene_root_transform_does_not_propagate() {
        // Containers do not forward transforms to children; this pins the
        // observed behavior rather than silently changing it.
        let mut root = Node::root(vec![Node::line3d(Vec3::ZERO, Vec3::X)]);
        root.apply_transform(Mat4::from_translation(Vec3::new(0.0, 5.0, 0.0)));

        let scene = SceneCompiler::new().compile(root);

        let group = scene.groups().next().unwrap();
        assert_eq!(group.vertices()[0].position(), Vec3::ZERO);
        assert_eq!(group.vertices()[1].position(), Vec3::X);
    }
}
