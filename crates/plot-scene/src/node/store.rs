//! Write-once vertex storage for scene nodes.

use glam::Mat4;
use thiserror::Error;

use crate::vertex::Vertex;

/// Error type for vertex storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VertexStorageError {
    #[error("vertices already set")]
    AlreadySet,

    #[error("vertices not set")]
    NotSet,
}

/// Per-node vertex storage, modeled as an explicit state machine so that
/// stage-ordering violations surface as errors instead of silent no-ops.
///
/// States advance `Unset -> Generated -> Placed` and never move backwards:
/// vertices are committed exactly once, and the one permitted in-place
/// update (baking the world transform into positions) happens exactly once.
#[derive(Debug, Clone, Default)]
pub enum VertexStore {
    /// No vertices committed yet.
    #[default]
    Unset,
    /// Object-space vertices committed, world transform not yet applied.
    Generated(Vec<Vertex>),
    /// World transform baked into the vertex positions.
    Placed(Vec<Vertex>),
}

impl VertexStore {
    /// Commits generated vertices. Fails with [`VertexStorageError::AlreadySet`]
    /// if vertices were committed before.
    pub fn set(&mut self, vertices: Vec<Vertex>) -> Result<(), VertexStorageError> {
        match self {
            VertexStore::Unset => {
                *self = VertexStore::Generated(vertices);
                Ok(())
            }
            _ => Err(VertexStorageError::AlreadySet),
        }
    }

    /// Returns the stored vertices, if any.
    pub fn vertices(&self) -> Option<&[Vertex]> {
        match self {
            VertexStore::Unset => None,
            VertexStore::Generated(v) | VertexStore::Placed(v) => Some(v),
        }
    }

    /// Returns true once vertices have been committed.
    pub fn is_set(&self) -> bool {
        !matches!(self, VertexStore::Unset)
    }

    /// Returns true if the store holds generated, not-yet-placed vertices.
    pub fn is_generated(&self) -> bool {
        matches!(self, VertexStore::Generated(_))
    }

    /// Returns true once the world transform has been baked in.
    pub fn is_placed(&self) -> bool {
        matches!(self, VertexStore::Placed(_))
    }

    /// Bakes a world transform into the stored positions, advancing the
    /// store to `Placed`.
    ///
    /// Placing before generation fails with [`VertexStorageError::NotSet`];
    /// placing twice fails with [`VertexStorageError::AlreadySet`].
    pub fn place(&mut self, transform: &Mat4) -> Result<(), VertexStorageError> {
        match std::mem::take(self) {
            VertexStore::Unset => Err(VertexStorageError::NotSet),
            VertexStore::Generated(vertices) => {
                let placed = vertices.iter().map(|v| v.transformed(transform)).collect();
                *self = VertexStore::Placed(placed);
                Ok(())
            }
            placed @ VertexStore::Placed(_) => {
                *self = placed;
                Err(VertexStorageError::AlreadySet)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn one_vertex() -> Vec<Vertex> {
        vec![Vertex::from_position(Vec3::new(1.0, 0.0, 0.0))]
    }

    #[test]
    fn set_twice_fails() {
        let mut store = VertexStore::default();
        assert!(store.set(one_vertex()).is_ok());
        assert_eq!(store.set(one_vertex()), Err(VertexStorageError::AlreadySet));
    }

    #[test]
    fn read_before_set_is_none() {
        let store = VertexStore::default();
        assert!(store.vertices().is_none());
        assert!(!store.is_set());
    }

    #[test]
    fn place_before_generate_fails() {
        let mut store = VertexStore::default();
        assert_eq!(
            store.place(&Mat4::IDENTITY),
            Err(VertexStorageError::NotSet)
        );
    }

    #[test]
    fn place_twice_fails() {
        let mut store = VertexStore::default();
        store.set(one_vertex()).unwrap();
        assert!(store.place(&Mat4::IDENTITY).is_ok());
        assert!(store.is_placed());
        assert_eq!(
            store.place(&Mat4::IDENTITY),
            Err(VertexStorageError::AlreadySet)
        );
    }

    #[test]
    fn place_transforms_positions() {
        let mut store = VertexStore::default();
        store.set(one_vertex()).unwrap();
        store
            .place(&Mat4::from_translation(Vec3::new(0.0, 0.0, 3.0)))
            .unwrap();

        let placed = store.vertices().unwrap();
        assert_eq!(placed[0].position(), Vec3::new(1.0, 0.0, 3.0));
    }
}
