//! The compiler's output model: render groups and the compiled scene.

use std::collections::BTreeMap;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::node::Node;
use crate::pipeline::PipelineDescriptor;
use crate::vertex::Vertex;

/// Identifier of a render group, issued by a counter scoped to one
/// compilation run (the first descriptor seen gets id 0).
///
/// Ids are lightweight and can be copied freely; GPU resources derived
/// from a group are keyed by its id on the renderer side.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct RenderGroupId(u32);

impl RenderGroupId {
    pub(crate) fn first() -> Self {
        Self(0)
    }

    pub(crate) fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Returns the raw id value.
    pub fn raw(&self) -> u32 {
        self.0
    }
}

/// Primitive topology a draw command is issued with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveKind {
    Triangle,
    Line,
}

/// One contiguous vertex range within a render group's buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawCommand {
    pub primitive: PrimitiveKind,
    pub vertex_start: u32,
    pub vertex_count: u32,
}

impl DrawCommand {
    /// The half-open vertex range this command covers.
    pub fn vertex_range(&self) -> Range<u32> {
        self.vertex_start..self.vertex_start + self.vertex_count
    }
}

/// A batch of nodes sharing one pipeline configuration: a single vertex
/// buffer plus the ordered draw commands into it.
///
/// `vertices` and `draw_commands` stay empty until the compiler's
/// assembly stage fills them.
#[derive(Debug, Clone)]
pub struct RenderGroup {
    id: RenderGroupId,
    pipeline: PipelineDescriptor,
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) draw_commands: Vec<DrawCommand>,
}

impl RenderGroup {
    pub(crate) fn new(id: RenderGroupId, pipeline: PipelineDescriptor) -> Self {
        Self {
            id,
            pipeline,
            vertices: Vec::new(),
            draw_commands: Vec::new(),
        }
    }

    /// Returns this group's id.
    pub fn id(&self) -> RenderGroupId {
        self.id
    }

    /// Returns the pipeline configuration shared by the group's nodes.
    pub fn pipeline(&self) -> &PipelineDescriptor {
        &self.pipeline
    }

    /// Returns the assembled vertex buffer contents.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Returns the draw commands, in traversal order.
    pub fn draw_commands(&self) -> &[DrawCommand] {
        &self.draw_commands
    }

    /// Returns the number of vertices in the assembled buffer.
    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    /// Returns true if no node contributed geometry to this group.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// The output of one compiler run: the consumed node tree plus its
/// render groups, keyed by id (iteration order = id order = the order
/// descriptors were first seen).
///
/// A compiled scene is replaced wholesale when the source tree changes;
/// there is no incremental recompilation.
#[derive(Debug)]
pub struct CompiledScene {
    pub(crate) root: Node,
    pub(crate) groups: BTreeMap<RenderGroupId, RenderGroup>,
}

impl CompiledScene {
    /// Returns the compiled node tree.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Returns a group by id.
    pub fn group(&self, id: RenderGroupId) -> Option<&RenderGroup> {
        self.groups.get(&id)
    }

    /// Iterates the render groups in id order.
    pub fn groups(&self) -> impl Iterator<Item = &RenderGroup> {
        self.groups.values()
    }

    /// Returns the number of render groups.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Returns the total number of vertices across all groups.
    pub fn total_vertex_count(&self) -> u32 {
        self.groups.values().map(RenderGroup::vertex_count).sum()
    }

    /// Returns the total number of draw commands across all groups.
    pub fn total_draw_commands(&self) -> usize {
        self.groups.values().map(|g| g.draw_commands.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_ids_increment_from_zero() {
        let first = RenderGroupId::first();
        assert_eq!(first.raw(), 0);
        assert_eq!(first.next().raw(), 1);
        assert_eq!(first.next().next().raw(), 2);
    }

    #[test]
    fn draw_command_range_is_half_open() {
        let cmd = DrawCommand {
            primitive: PrimitiveKind::Triangle,
            vertex_start: 6,
            vertex_count: 2,
        };
        assert_eq!(cmd.vertex_range(), 6..8);
    }
}
