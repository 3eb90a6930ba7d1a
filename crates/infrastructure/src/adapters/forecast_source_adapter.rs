//! Forecast source adapter - Implements ForecastSourcePort using integration_weather

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::ForecastSourcePort;
use async_trait::async_trait;
use domain::{CanonicalDayRecord, GeoLocation, ProviderId};
use integration_weather::{ForecastClient, ProviderAdapter, WeatherError};
use tracing::{debug, instrument};

/// One provider reached over HTTP
pub struct ProviderSourceAdapter {
    adapter: Arc<dyn ProviderAdapter>,
    client: Arc<dyn ForecastClient>,
}

impl std::fmt::Debug for ProviderSourceAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSourceAdapter")
            .field("provider", &self.adapter.provider())
            .finish_non_exhaustive()
    }
}

impl ProviderSourceAdapter {
    #[must_use]
    pub fn new(adapter: Arc<dyn ProviderAdapter>, client: Arc<dyn ForecastClient>) -> Self {
        Self { adapter, client }
    }

    /// Map integration weather error to application error
    fn map_error(err: WeatherError) -> ApplicationError {
        match err {
            WeatherError::MissingDataKey {
                provider,
                key,
                detail,
            } => ApplicationError::source_unavailable(
                provider,
                format!("response has no '{key}' data ({detail})"),
            ),
            WeatherError::ConnectionFailed(e)
            | WeatherError::RequestFailed(e)
            | WeatherError::ServiceUnavailable(e) => ApplicationError::ExternalService(e),
            WeatherError::ParseError(e) => {
                ApplicationError::ExternalService(format!("invalid response: {e}"))
            },
            WeatherError::RateLimitExceeded => ApplicationError::RateLimited,
            WeatherError::MissingApiKey(provider) => {
                ApplicationError::Configuration(format!("no API key configured for {provider}"))
            },
        }
    }
}

#[async_trait]
impl ForecastSourcePort for ProviderSourceAdapter {
    fn provider(&self) -> ProviderId {
        self.adapter.provider()
    }

    #[instrument(skip(self, location), fields(provider = %self.adapter.provider(), days))]
    async fn fetch_daily(
        &self,
        location: &GeoLocation,
        days: u8,
    ) -> Result<Vec<CanonicalDayRecord>, ApplicationError> {
        let result = self
            .client
            .fetch_forecast(self.adapter.as_ref(), location, days)
            .await
            .map_err(Self::map_error);

        match &result {
            Ok(records) => debug!(days = records.len(), "Retrieved provider forecast"),
            Err(e) => debug!(error = %e, "Failed to retrieve provider forecast"),
        }

        result
    }
}
