//! Infrastructure layer - Adapters for external systems
//!
//! Implements the forecast source port on top of the provider integrations,
//! loads configuration, initializes logging and wires the forecast service.

pub mod adapters;
pub mod config;
pub mod sources;
pub mod telemetry;

pub use adapters::ProviderSourceAdapter;
pub use config::{
    AppConfig, DryingConfig, LoggingConfig, MergeConfig, ProviderConfig, ProvidersConfig,
};
pub use sources::{ProviderStatus, build_forecast_service, provider_statuses};
pub use telemetry::{TelemetryError, init_logging, resolve_filter};
