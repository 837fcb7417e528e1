//! Lazily-compiled scene with explicit invalidation.

use crate::compiler::SceneCompiler;
use crate::group::CompiledScene;
use crate::node::Node;

/// A scene source paired with its compiled form.
///
/// Compilation is deferred until the compiled scene is first requested
/// and cached after that. There is no incremental recompilation: any
/// change to the source tree goes through [`PlotScene::replace`], which
/// discards the cached result wholesale.
pub struct PlotScene {
    compiler: SceneCompiler,
    source: Option<Node>,
    compiled: Option<CompiledScene>,
}

impl PlotScene {
    /// Creates a scene around a source tree, compiled with the default
    /// (no configured transforms) compiler.
    pub fn new(root: Node) -> Self {
        Self::with_compiler(root, SceneCompiler::new())
    }

    /// Creates a scene compiled with a pre-configured compiler.
    pub fn with_compiler(root: Node, compiler: SceneCompiler) -> Self {
        Self {
            compiler,
            source: Some(root),
            compiled: None,
        }
    }

    /// Returns true once the scene has been compiled.
    pub fn is_compiled(&self) -> bool {
        self.compiled.is_some()
    }

    /// Returns the compiled scene, compiling the source tree on first
    /// access.
    pub fn compiled(&mut self) -> &CompiledScene {
        let compiler = &mut self.compiler;
        let source = &mut self.source;
        self.compiled.get_or_insert_with(|| {
            let root = source.take().unwrap_or_else(|| Node::root(Vec::new()));
            compiler.compile(root)
        })
    }

    /// Replaces the source tree, discarding any compiled result. The
    /// next [`PlotScene::compiled`] call recompiles from scratch.
    pub fn replace(&mut self, root: Node) {
        self.source = Some(root);
        self.compiled = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn compiles_lazily_on_first_access() {
        let mut scene = PlotScene::new(Node::root(vec![Node::line3d(Vec3::ZERO, Vec3::X)]));
        assert!(!scene.is_compiled());

        assert_eq!(scene.compiled().total_vertex_count(), 2);
        assert!(scene.is_compiled());
    }

    #[test]
    fn replace_discards_the_cached_result() {
        let mut scene = PlotScene::new(Node::root(vec![Node::line3d(Vec3::ZERO, Vec3::X)]));
        assert_eq!(scene.compiled().total_vertex_count(), 2);

        scene.replace(Node::root(vec![
            Node::line3d(Vec3::ZERO, Vec3::X),
            Node::plane(Vec3::Z, Vec3::ZERO, 1.0),
        ]));
        assert!(!scene.is_compiled());
        assert_eq!(scene.compiled().total_vertex_count(), 8);
    }
}
