//! Renderer error types.

use thiserror::Error;

/// Error type for scene renderer operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RendererError {
    /// A pipeline descriptor named a shader function the plot library
    /// does not contain. Fatal for that render group only.
    #[error("Shader function not found: {0}")]
    FunctionNotFound(String),
}
