//! Forecast pipeline service
//!
//! Runs one forecast cycle: fetch every configured source, degrade failed
//! sources to warnings, merge by date, estimate the drying day.

use std::sync::Arc;

use chrono::Utc;
use domain::{CanonicalDayRecord, GeoLocation, ProviderId, SourceForecast};
use futures::future::join_all;
use tracing::{info, instrument, warn};

use super::{DryingEstimator, ForecastMerger};
use crate::error::ApplicationError;
use crate::ports::ForecastSourcePort;
use crate::report::{ForecastOutcome, ForecastReport, SourceWarning};

/// Outcome of fetching a single source
pub type SourceFetch = (ProviderId, Result<Vec<CanonicalDayRecord>, ApplicationError>);

/// Orchestrates a forecast run over a set of sources
pub struct ForecastService {
    sources: Vec<Arc<dyn ForecastSourcePort>>,
    merger: ForecastMerger,
    estimator: DryingEstimator,
    forecast_days: u8,
    /// Providers left out before the run, reported with every outcome
    skipped: Vec<SourceWarning>,
}

impl std::fmt::Debug for ForecastService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForecastService")
            .field("sources", &self.providers())
            .field("merger", &self.merger)
            .field("estimator", &self.estimator)
            .field("forecast_days", &self.forecast_days)
            .field("skipped", &self.skipped)
            .finish()
    }
}

impl ForecastService {
    /// Create a service over `sources`, queried in the given order
    #[must_use]
    pub fn new(
        sources: Vec<Arc<dyn ForecastSourcePort>>,
        merger: ForecastMerger,
        estimator: DryingEstimator,
        forecast_days: u8,
    ) -> Self {
        Self {
            sources,
            merger,
            estimator,
            forecast_days,
            skipped: Vec::new(),
        }
    }

    /// Report providers that were configured but not queried
    #[must_use]
    pub fn with_skipped(mut self, skipped: Vec<SourceWarning>) -> Self {
        self.skipped = skipped;
        self
    }

    /// Warnings for providers left out of the run
    #[must_use]
    pub fn skipped(&self) -> &[SourceWarning] {
        &self.skipped
    }

    /// Providers this service queries
    #[must_use]
    pub fn providers(&self) -> Vec<ProviderId> {
        self.sources.iter().map(|s| s.provider()).collect()
    }

    #[must_use]
    pub const fn forecast_days(&self) -> u8 {
        self.forecast_days
    }

    /// Fetch all sources concurrently and assemble the outcome
    #[instrument(skip(self, location), fields(location = %location, sources = self.sources.len()))]
    pub async fn run(&self, location: &GeoLocation) -> ForecastOutcome {
        let days = self.forecast_days;
        let fetches = self.sources.iter().map(|source| async move {
            let provider = source.provider();
            (provider, source.fetch_daily(location, days).await)
        });

        let results = join_all(fetches).await;
        self.assemble(*location, results)
    }

    /// Turn per-source fetch results into a report
    ///
    /// Skipped providers, source failures and empty sources become warnings.
    /// When no source produced a day the outcome is `ForecastOutcome::NoData`.
    pub fn assemble(&self, location: GeoLocation, results: Vec<SourceFetch>) -> ForecastOutcome {
        let mut forecasts = Vec::with_capacity(results.len());
        let mut warnings = self.skipped.clone();

        for (provider, result) in results {
            match result {
                Ok(records) if records.is_empty() => {
                    warn!(provider = %provider, "Provider returned no forecast days");
                    warnings.push(SourceWarning {
                        provider,
                        message: "no forecast days returned".to_string(),
                    });
                },
                Ok(records) => forecasts.push(SourceForecast::new(provider, records)),
                Err(e) => {
                    warn!(provider = %provider, error = %e, "Skipping unavailable provider");
                    warnings.push(SourceWarning {
                        provider,
                        message: e.to_string(),
                    });
                },
            }
        }

        let days = self.merger.merge(&forecasts);
        if days.is_empty() {
            warn!(
                warnings = warnings.len(),
                "No forecast data available from any provider"
            );
            return ForecastOutcome::NoData { warnings };
        }

        let drying_estimate = self.estimator.estimate(&days);
        let contributing_sources: Vec<ProviderId> =
            forecasts.iter().map(|f| f.provider).collect();

        info!(
            days = days.len(),
            sources = contributing_sources.len(),
            skipped = warnings.len(),
            drying_estimate = %drying_estimate,
            "Forecast run complete"
        );

        ForecastOutcome::Available(ForecastReport {
            location,
            generated_at: Utc::now(),
            days,
            drying_estimate,
            drying_threshold: self.estimator.threshold(),
            contributing_sources,
            warnings,
        })
    }
}
