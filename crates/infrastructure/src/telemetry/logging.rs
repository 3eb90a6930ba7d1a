use thiserror::Error;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// Errors raised while installing the global subscriber
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The filter directive could not be parsed
    #[error("Invalid log filter '{filter}': {reason}")]
    InvalidFilter { filter: String, reason: String },

    /// A global subscriber is already installed
    #[error("Failed to initialize logging: {0}")]
    Init(String),
}

/// Pick the effective filter directive
///
/// An explicit override (from `-v` flags) wins over `RUST_LOG`, which wins
/// over the configured filter.
#[must_use]
pub fn resolve_filter(
    config: &LoggingConfig,
    override_filter: Option<&str>,
    rust_log: Option<&str>,
) -> String {
    override_filter
        .or(rust_log.filter(|value| !value.trim().is_empty()))
        .unwrap_or(&config.filter)
        .to_string()
}

/// Install the global tracing subscriber
///
/// # Errors
///
/// Returns an error if the filter is invalid or a subscriber is already set.
pub fn init_logging(
    config: &LoggingConfig,
    override_filter: Option<&str>,
) -> Result<(), TelemetryError> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = resolve_filter(config, override_filter, rust_log.as_deref());
    let env_filter =
        EnvFilter::try_new(&filter).map_err(|e| TelemetryError::InvalidFilter {
            filter: filter.clone(),
            reason: e.to_string(),
        })?;

    let json_layer = config
        .json
        .then(|| fmt::layer().json().with_writer(std::io::stderr));
    let text_layer = (!config.json).then(|| {
        fmt::layer()
            .with_target(true)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .try_init()
        .map_err(|e| TelemetryError::Init(e.to_string()))?;

    debug!(filter = %filter, json = config.json, "Logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_wins() {
        let config = LoggingConfig::default();
        assert_eq!(
            resolve_filter(&config, Some("debug"), Some("trace")),
            "debug"
        );
    }

    #[test]
    fn rust_log_beats_config() {
        let config = LoggingConfig::default();
        assert_eq!(resolve_filter(&config, None, Some("info")), "info");
        assert_eq!(resolve_filter(&config, None, Some("  ")), "warn");
        assert_eq!(resolve_filter(&config, None, None), "warn");
    }

    #[test]
    fn invalid_filter_is_reported() {
        let err = init_logging(&LoggingConfig::default(), Some("drycast=notalevel")).unwrap_err();
        assert!(matches!(err, TelemetryError::InvalidFilter { .. }));
    }
}
