//! Error types for model parsing.

use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised when parsing model values from strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("Unknown detection method: {0}")]
    UnknownDetectionMethod(String),

    #[error("Unknown swing phase: {0}")]
    UnknownPhase(String),

    #[error("Unknown analysis status: {0}")]
    UnknownStatus(String),
}
