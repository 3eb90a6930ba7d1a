//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Provider name not recognised
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}
