//! Error types for Superquad

use thiserror::Error;

/// Result type alias using Superquad's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in Superquad operations
#[derive(Error, Debug)]
pub enum Error {
    /// A parameter is outside the domain of the operation
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Coupled arrays do not share the same shape
    #[error("Shape mismatch: expected {expected} values, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// Export failed
    #[error("Export failed: {0}")]
    Export(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Job description could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
