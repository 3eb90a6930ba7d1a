//! Forecast HTTP client
//!
//! Fetches raw provider JSON and hands it to the provider's adapter.

use std::time::Duration;

use async_trait::async_trait;
use domain::{CanonicalDayRecord, GeoLocation};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::config::WeatherConfig;
use crate::error::WeatherError;
use crate::providers::{ProviderAdapter, clamp_days, error_detail};

/// Longest body excerpt carried in error messages
const BODY_SNIPPET_LEN: usize = 200;

/// Client trait for fetching provider forecasts
#[async_trait]
pub trait ForecastClient: Send + Sync {
    /// GET `url` and decode the body as JSON
    async fn fetch_json(&self, url: &str) -> Result<Value, WeatherError>;

    /// Fetch and normalize `days` forecast days from `adapter`'s provider
    async fn fetch_forecast(
        &self,
        adapter: &dyn ProviderAdapter,
        location: &GeoLocation,
        days: u8,
    ) -> Result<Vec<CanonicalDayRecord>, WeatherError> {
        let days = clamp_days(days);
        let url = adapter.forecast_url(location, days)?;
        let response = self.fetch_json(&url).await?;
        adapter.normalize(&response, days)
    }
}

/// `reqwest`-backed forecast client shared by all providers
#[derive(Debug, Clone)]
pub struct ForecastHttpClient {
    client: Client,
}

impl ForecastHttpClient {
    /// Create a new client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &WeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| WeatherError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client })
    }

    /// Create a new client with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_defaults() -> Result<Self, WeatherError> {
        Self::new(&WeatherConfig::default())
    }
}

#[async_trait]
impl ForecastClient for ForecastHttpClient {
    #[instrument(skip_all)]
    async fn fetch_json(&self, url: &str) -> Result<Value, WeatherError> {
        debug!(url = %redact_key(url), "Fetching forecast");

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                WeatherError::ConnectionFailed(e.without_url().to_string())
            } else {
                WeatherError::RequestFailed(e.without_url().to_string())
            }
        })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(WeatherError::RateLimitExceeded);
        }
        if status.is_server_error() {
            return Err(WeatherError::ServiceUnavailable(format!("HTTP {status}")));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WeatherError::RequestFailed(format!(
                "HTTP {status}: {}",
                describe_body(&body)
            )));
        }

        response
            .json()
            .await
            .map_err(|e| WeatherError::ParseError(e.without_url().to_string()))
    }
}

/// The provider's error message if the body is JSON, else a trimmed excerpt
fn describe_body(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .as_ref()
        .and_then(error_detail)
        .unwrap_or_else(|| body.trim().chars().take(BODY_SNIPPET_LEN).collect())
}

/// Mask the value of any `key=` query parameter
fn redact_key(url: &str) -> String {
    let Some((base, query)) = url.split_once('?') else {
        return url.to_string();
    };

    let query = query
        .split('&')
        .map(|pair| {
            if pair.starts_with("key=") {
                "key=[REDACTED]"
            } else {
                pair
            }
        })
        .collect::<Vec<_>>()
        .join("&");
    format!("{base}?{query}")
}
