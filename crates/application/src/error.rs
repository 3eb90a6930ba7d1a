//! Application-level errors

use domain::{DomainError, ProviderId};
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A provider returned no usable forecast data
    #[error("{provider} unavailable: {reason}")]
    SourceUnavailable { provider: ProviderId, reason: String },

    /// External service error
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Create a source unavailable error
    pub fn source_unavailable(provider: ProviderId, reason: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            provider,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_unavailable_message_names_provider() {
        let err = ApplicationError::source_unavailable(ProviderId::Weatherbit, "missing 'data'");
        assert_eq!(err.to_string(), "Weatherbit unavailable: missing 'data'");
    }

    #[test]
    fn domain_error_is_transparent() {
        let err: ApplicationError = DomainError::UnknownProvider("x".into()).into();
        assert_eq!(err.to_string(), "Unknown provider: x");
    }
}
