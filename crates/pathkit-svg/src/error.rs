//! Error types for path-data operations.

use thiserror::Error;

use crate::transform::Transform;

/// Result type alias for path-data operations.
pub type Result<T> = std::result::Result<T, PathError>;

/// Errors that can occur while parsing or manipulating path data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    /// Malformed path-data or transform-list text.
    #[error("Parse error at offset {offset}: {message}")]
    Parse { offset: usize, message: String },

    /// A command sequence that violates the path-data structure.
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// A transform that cannot be expressed with the commands present.
    #[error(
        "Cannot apply {transform} to command #{index} {command}: {reason}. \
         Retry with one of: {}",
        .remedies.join(", ")
    )]
    NotRepresentable {
        command: String,
        index: usize,
        transform: Transform,
        reason: String,
        remedies: Vec<&'static str>,
    },

    /// An inverse was required of a transform with a zero determinant.
    #[error("Singular transform: {0}")]
    SingularTransform(Transform),
}

impl PathError {
    /// Create a new parse error.
    pub fn parse(offset: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            offset,
            message: message.into(),
        }
    }

    /// Create a new invalid-path error.
    pub fn invalid_path(message: impl Into<String>) -> Self {
        Self::InvalidPath(message.into())
    }

    /// Byte offset of the offending token, for parse errors.
    pub fn offset(&self) -> Option<usize> {
        match self {
            PathError::Parse { offset, .. } => Some(*offset),
            _ => None,
        }
    }
}
