//! Forecast provider adapters
//!
//! Each provider maps its own response schema onto
//! [`CanonicalDayRecord`]s. Adding a provider means adding an adapter here;
//! merging and estimation never see provider-specific shapes.

mod open_meteo;
mod visual_crossing;
mod weather_api;
mod weatherbit;

use std::sync::Arc;

use domain::{CanonicalDayRecord, GeoLocation, ProviderId};
pub use open_meteo::OpenMeteoAdapter;
use reqwest::Url;
use serde_json::Value;
use tracing::warn;
pub use visual_crossing::VisualCrossingAdapter;
pub use weather_api::WeatherApiAdapter;
pub use weatherbit::WeatherbitAdapter;

use crate::config::ProviderEndpoint;
use crate::error::WeatherError;

/// Longest forecast any adapter requests
pub const MAX_FORECAST_DAYS: u8 = 16;

/// Maps one provider's API onto canonical day records
pub trait ProviderAdapter: Send + Sync + std::fmt::Debug {
    /// Which provider this adapter speaks to
    fn provider(&self) -> ProviderId;

    /// Build the request URL for `days` forecast days at `location`
    ///
    /// # Errors
    ///
    /// Returns `WeatherError::MissingApiKey` if the provider needs a key and
    /// none is configured.
    fn forecast_url(&self, location: &GeoLocation, days: u8) -> Result<String, WeatherError>;

    /// Normalize a raw response into at most `max_days` records, in source order
    ///
    /// # Errors
    ///
    /// Returns `WeatherError::MissingDataKey` if the response carries no
    /// forecast data.
    fn normalize(
        &self,
        response: &Value,
        max_days: u8,
    ) -> Result<Vec<CanonicalDayRecord>, WeatherError>;
}

/// Clamp a requested day count to what providers accept
#[must_use]
pub const fn clamp_days(days: u8) -> u8 {
    if days == 0 {
        1
    } else if days > MAX_FORECAST_DAYS {
        MAX_FORECAST_DAYS
    } else {
        days
    }
}

/// Build the adapter for `provider` talking to `endpoint`
#[must_use]
pub fn adapter_for(provider: ProviderId, endpoint: ProviderEndpoint) -> Arc<dyn ProviderAdapter> {
    match provider {
        ProviderId::Weatherbit => Arc::new(WeatherbitAdapter::new(endpoint)),
        ProviderId::OpenMeteo => Arc::new(OpenMeteoAdapter::new(endpoint)),
        ProviderId::VisualCrossing => Arc::new(VisualCrossingAdapter::new(endpoint)),
        ProviderId::WeatherApi => Arc::new(WeatherApiAdapter::new(endpoint)),
    }
}

/// Default API base URL for `provider`
#[must_use]
pub const fn default_base_url(provider: ProviderId) -> &'static str {
    match provider {
        ProviderId::Weatherbit => weatherbit::DEFAULT_BASE_URL,
        ProviderId::OpenMeteo => open_meteo::DEFAULT_BASE_URL,
        ProviderId::VisualCrossing => visual_crossing::DEFAULT_BASE_URL,
        ProviderId::WeatherApi => weather_api::DEFAULT_BASE_URL,
    }
}

fn require_key(endpoint: &ProviderEndpoint, provider: ProviderId) -> Result<&str, WeatherError> {
    endpoint
        .api_key_str()
        .ok_or(WeatherError::MissingApiKey(provider))
}

/// Append `params` to `base` as a percent-encoded query string
fn with_query(base: &str, params: &[(&str, String)]) -> Result<String, WeatherError> {
    let mut url = Url::parse(base)
        .map_err(|e| WeatherError::RequestFailed(format!("invalid URL '{base}': {e}")))?;
    {
        let mut query = url.query_pairs_mut();
        for (name, value) in params {
            query.append_pair(name, value);
        }
    }
    Ok(url.to_string())
}

/// Build the "no data" error, pulling the provider's own explanation if any
fn missing_data(provider: ProviderId, key: &'static str, response: &Value) -> WeatherError {
    WeatherError::MissingDataKey {
        provider,
        key,
        detail: error_detail(response).unwrap_or_else(|| "no error message".to_string()),
    }
}

/// Providers report failures under different keys
pub(crate) fn error_detail(response: &Value) -> Option<String> {
    let candidate = response
        .get("error")
        .or_else(|| response.get("reason"))
        .or_else(|| response.get("message"))?;

    match candidate {
        Value::String(message) => Some(message.clone()),
        Value::Object(inner) => inner
            .get("message")
            .and_then(Value::as_str)
            .map(ToString::to_string),
        Value::Bool(true) => response
            .get("reason")
            .and_then(Value::as_str)
            .map(ToString::to_string),
        _ => None,
    }
}

fn skip_undated(provider: ProviderId, index: usize) {
    warn!(provider = %provider, index, "Skipping forecast entry without a valid date");
}
