//! Forecast service wiring
//!
//! Turns an [`AppConfig`] into a ready [`ForecastService`]: one
//! [`ProviderSourceAdapter`] per enabled provider, sharing one HTTP client.

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::ForecastSourcePort;
use application::{DryingEstimator, ForecastMerger, ForecastService, SourceWarning};
use domain::ProviderId;
use integration_weather::{ForecastClient, ForecastHttpClient, adapter_for};
use serde::Serialize;
use tracing::{info, warn};

use crate::adapters::ProviderSourceAdapter;
use crate::config::AppConfig;

/// Configured state of one provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderStatus {
    pub provider: ProviderId,
    pub enabled: bool,
    pub requires_api_key: bool,
    pub api_key_configured: bool,
    pub base_url: String,
}

impl ProviderStatus {
    /// Whether a forecast run will query this provider
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.enabled && (!self.requires_api_key || self.api_key_configured)
    }

    /// Short human-readable state
    #[must_use]
    pub const fn describe(&self) -> &'static str {
        if !self.enabled {
            "disabled"
        } else if self.is_active() {
            "active"
        } else {
            "skipped (no API key)"
        }
    }
}

/// Status of every supported provider, in query order
#[must_use]
pub fn provider_statuses(config: &AppConfig) -> Vec<ProviderStatus> {
    config
        .providers
        .iter()
        .map(|(provider, settings)| ProviderStatus {
            provider,
            enabled: settings.enabled,
            requires_api_key: provider.requires_api_key(),
            api_key_configured: settings.has_api_key(),
            base_url: settings.base_url_for(provider).to_string(),
        })
        .collect()
}

/// Build the forecast service described by `config`
///
/// Providers that are disabled are left out silently. Providers that need an
/// API key and have none are left out and reported as a `SourceWarning` on
/// every run.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be initialized.
pub fn build_forecast_service(config: &AppConfig) -> Result<ForecastService, ApplicationError> {
    let client: Arc<dyn ForecastClient> = Arc::new(
        ForecastHttpClient::new(&config.http)
            .map_err(|e| ApplicationError::Internal(e.to_string()))?,
    );

    let mut sources: Vec<Arc<dyn ForecastSourcePort>> = Vec::new();
    let mut skipped = Vec::new();
    for status in provider_statuses(config) {
        if !status.enabled {
            continue;
        }
        if !status.is_active() {
            warn!(provider = %status.provider, "Skipping provider without API key");
            skipped.push(SourceWarning {
                provider: status.provider,
                message: "no API key configured".to_string(),
            });
            continue;
        }

        let endpoint = config.providers.get(status.provider).endpoint(status.provider);
        sources.push(Arc::new(ProviderSourceAdapter::new(
            adapter_for(status.provider, endpoint),
            Arc::clone(&client),
        )));
    }

    info!(
        sources = sources.len(),
        skipped = skipped.len(),
        days = config.forecast_days,
        policy = ?config.merge.missing_values,
        "Forecast service configured"
    );

    Ok(ForecastService::new(
        sources,
        ForecastMerger::new(config.merge.missing_values),
        DryingEstimator::new(config.drying.threshold),
        config.forecast_days,
    )
    .with_skipped(skipped))
}
