//! Forecast source port
//!
//! Defines the interface for retrieving one provider's daily forecast,
//! already normalized to canonical records.

use async_trait::async_trait;
use domain::{CanonicalDayRecord, GeoLocation, ProviderId};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for a single forecast provider
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ForecastSourcePort: Send + Sync {
    /// Which provider this source represents
    fn provider(&self) -> ProviderId;

    /// Fetch and normalize up to `days` forecast days for a location
    ///
    /// Implementations return `ApplicationError::SourceUnavailable` when the
    /// provider response carries no forecast data.
    async fn fetch_daily(
        &self,
        location: &GeoLocation,
        days: u8,
    ) -> Result<Vec<CanonicalDayRecord>, ApplicationError>;
}
