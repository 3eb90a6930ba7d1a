//! Forecast provider integrations
//!
//! Normalizes daily forecasts from Weatherbit, Open-Meteo, Visual Crossing
//! and WeatherAPI into canonical day records, and fetches the raw provider
//! responses over HTTP.
//!
//! # Architecture
//!
//! Every provider implements [`ProviderAdapter`]: it knows how to build its
//! request URL and how to map its response shape onto
//! [`domain::CanonicalDayRecord`]. [`ForecastHttpClient`] performs the
//! request and hands the JSON to the adapter.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_weather::{ForecastClient, ForecastHttpClient, OpenMeteoAdapter, WeatherConfig};
//!
//! let client = ForecastHttpClient::new(&WeatherConfig::default())?;
//! let adapter = OpenMeteoAdapter::default();
//! let days = client.fetch_forecast(&adapter, &domain::GeoLocation::london(), 10).await?;
//! ```

pub mod client;
mod config;
mod error;
mod fields;
pub mod providers;

pub use client::{ForecastClient, ForecastHttpClient};
pub use config::{ProviderEndpoint, WeatherConfig};
pub use error::WeatherError;
pub use providers::{
    MAX_FORECAST_DAYS, OpenMeteoAdapter, ProviderAdapter, VisualCrossingAdapter, WeatherApiAdapter,
    WeatherbitAdapter, adapter_for, clamp_days, default_base_url,
};
