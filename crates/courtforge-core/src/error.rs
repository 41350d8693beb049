//! Error types for CourtForge

use thiserror::Error;

/// Main error type for CourtForge operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CourtForgeError {
    /// A mutation would break an invariant of the domain model
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Holistic validation failed; messages are kept in discovery order
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Invalid operation for current solver state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Internal error (should not occur in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CourtForgeError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        CourtForgeError::InvalidArgument(message.into())
    }
}

/// Result type alias for CourtForge operations
pub type Result<T> = std::result::Result<T, CourtForgeError>;
