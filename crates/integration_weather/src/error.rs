//! Weather integration error types

use domain::ProviderId;
use thiserror::Error;

/// Errors that can occur while fetching or normalizing a provider forecast
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Connection to the weather service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the weather service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse response from weather service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Provider requires an API key and none is configured
    #[error("No API key configured for {0}")]
    MissingApiKey(ProviderId),

    /// Response does not contain the provider's forecast data key
    #[error("{provider} response has no '{key}' data: {detail}")]
    MissingDataKey {
        provider: ProviderId,
        key: &'static str,
        detail: String,
    },
}
