//! Application configuration
//!
//! Loaded from built-in defaults, an optional TOML file and `DRYCAST_*`
//! environment variables, in that order of precedence.

mod providers;

use std::path::Path;

use application::{DEFAULT_DRYING_THRESHOLD, MissingValuePolicy};
use domain::GeoLocation;
use integration_weather::{MAX_FORECAST_DAYS, WeatherConfig};
use serde::{Deserialize, Serialize};

pub use providers::{ProviderConfig, ProvidersConfig};

/// Environment variable prefix
pub const ENV_PREFIX: &str = "DRYCAST";

/// Config file looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "drycast";

const fn default_true() -> bool {
    true
}

const fn default_forecast_days() -> u8 {
    10
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Location to forecast for (default: London)
    #[serde(default)]
    pub location: GeoLocation,

    /// Number of forecast days requested from each provider (1-16)
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u8,

    /// HTTP client settings
    #[serde(default)]
    pub http: WeatherConfig,

    /// Per-provider settings
    #[serde(default)]
    pub providers: ProvidersConfig,

    /// Merge settings
    #[serde(default)]
    pub merge: MergeConfig,

    /// Drying estimate settings
    #[serde(default)]
    pub drying: DryingConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            location: GeoLocation::default(),
            forecast_days: default_forecast_days(),
            http: WeatherConfig::default(),
            providers: ProvidersConfig::default(),
            merge: MergeConfig::default(),
            drying: DryingConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// How the merger treats optional fields a provider did not report
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MergeConfig {
    /// `ignore` (average reported values only) or `zero`
    #[serde(default)]
    pub missing_values: MissingValuePolicy,
}

/// Drying estimate configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DryingConfig {
    /// Cumulative score at which the ground counts as dry (default: 3.0)
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

const fn default_threshold() -> f64 {
    DEFAULT_DRYING_THRESHOLD
}

impl Default for DryingConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, used when `RUST_LOG` is unset (default: "warn")
    #[serde(default = "default_log_filter")]
    pub filter: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

fn default_log_filter() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from an optional file and the environment
    ///
    /// With `path` set the file must exist; otherwise `drycast.toml` in the
    /// working directory is read if present. Environment variables use the
    /// `DRYCAST_` prefix and `__` between sections, for example
    /// `DRYCAST_PROVIDERS__WEATHERBIT__API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or the result is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let defaults = Self::default();
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let config = config::Config::builder()
            // Both coordinates, so an override of one still yields a full location
            .set_default("location.latitude", defaults.location.latitude())?
            .set_default("location.longitude", defaults.location.longitude())?
            .set_default("forecast_days", i64::from(defaults.forecast_days))?
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let app: Self = config.try_deserialize()?;
        app.validate()?;
        Ok(app)
    }

    /// Check value ranges the type system does not enforce
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Message` describing the first invalid value.
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if !(1..=MAX_FORECAST_DAYS).contains(&self.forecast_days) {
            return Err(config::ConfigError::Message(format!(
                "forecast_days must be between 1 and {MAX_FORECAST_DAYS}, got {}",
                self.forecast_days
            )));
        }
        if !self.drying.threshold.is_finite() || self.drying.threshold <= 0.0 {
            return Err(config::ConfigError::Message(format!(
                "drying.threshold must be a positive number, got {}",
                self.drying.threshold
            )));
        }
        if self.http.timeout_secs == 0 {
            return Err(config::ConfigError::Message(
                "http.timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
