//! Forecast merger
//!
//! Combines the per-provider day sequences into one record per calendar
//! date. Every numeric field is the arithmetic mean of the values the
//! providers reported for that date, rounded to two decimals. Dates are
//! matched by exact equality and emitted in ascending order.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use domain::{CanonicalDayRecord, MergedDayRecord, ProviderId, SourceForecast};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How unknown optional measurements enter the average
///
/// Only solar radiation and soil moisture can be unknown. The other fields
/// are already 0 when a provider omits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MissingValuePolicy {
    /// Average only the providers that reported a value; stay unknown if none did.
    /// The drying estimator still scores an unknown as its own default.
    #[default]
    #[serde(rename = "ignore")]
    Ignore,
    /// Substitute 0 for unknown before averaging, so every contributing
    /// provider counts (`merge.missing_values = "zero"`)
    #[serde(rename = "zero")]
    TreatAsZero,
}

/// Round to two decimal places, half away from zero
#[must_use]
pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Default, Clone, Copy)]
struct Mean {
    sum: f64,
    count: u32,
}

impl Mean {
    fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn value(self) -> Option<f64> {
        (self.count > 0).then(|| round_to_hundredths(self.sum / f64::from(self.count)))
    }
}

#[derive(Debug, Default)]
struct DayAccumulator {
    precipitation_probability: Mean,
    temperature: Mean,
    wind_speed: Mean,
    humidity: Mean,
    dew_point: Mean,
    solar_radiation: Mean,
    soil_moisture: Mean,
    sources: Vec<ProviderId>,
}

impl DayAccumulator {
    fn add(&mut self, provider: ProviderId, record: &CanonicalDayRecord, policy: MissingValuePolicy) {
        self.precipitation_probability
            .push(record.precipitation_probability);
        self.temperature.push(record.temperature);
        self.wind_speed.push(record.wind_speed);
        self.humidity.push(record.humidity);
        self.dew_point.push(record.dew_point);
        Self::add_optional(&mut self.solar_radiation, record.solar_radiation, policy);
        Self::add_optional(&mut self.soil_moisture, record.soil_moisture, policy);

        if !self.sources.contains(&provider) {
            self.sources.push(provider);
        }
    }

    fn add_optional(mean: &mut Mean, value: Option<f64>, policy: MissingValuePolicy) {
        match (value, policy) {
            (Some(v), _) => mean.push(v),
            (None, MissingValuePolicy::TreatAsZero) => mean.push(0.0),
            (None, MissingValuePolicy::Ignore) => {},
        }
    }

    fn finish(self, date: NaiveDate) -> MergedDayRecord {
        MergedDayRecord {
            date,
            precipitation_probability: self.precipitation_probability.value().unwrap_or_default(),
            temperature: self.temperature.value().unwrap_or_default(),
            wind_speed: self.wind_speed.value().unwrap_or_default(),
            humidity: self.humidity.value().unwrap_or_default(),
            dew_point: self.dew_point.value().unwrap_or_default(),
            solar_radiation: self.solar_radiation.value(),
            soil_moisture: self.soil_moisture.value(),
            sources: self.sources,
        }
    }
}

/// Date-keyed averaging of provider forecasts
#[derive(Debug, Clone, Copy, Default)]
pub struct ForecastMerger {
    policy: MissingValuePolicy,
}

impl ForecastMerger {
    #[must_use]
    pub const fn new(policy: MissingValuePolicy) -> Self {
        Self { policy }
    }

    #[must_use]
    pub const fn policy(&self) -> MissingValuePolicy {
        self.policy
    }

    /// Merge provider sequences into one ascending-by-date sequence
    ///
    /// Empty sources contribute nothing. When every source is empty the
    /// result is empty; callers treat that as "no data available".
    #[must_use]
    pub fn merge(&self, sources: &[SourceForecast]) -> Vec<MergedDayRecord> {
        let mut days: BTreeMap<NaiveDate, DayAccumulator> = BTreeMap::new();

        for source in sources {
            for record in &source.records {
                days.entry(record.date)
                    .or_default()
                    .add(source.provider, record, self.policy);
            }
        }

        debug!(
            sources = sources.len(),
            dates = days.len(),
            policy = ?self.policy,
            "Merged provider forecasts"
        );

        days.into_iter()
            .map(|(date, acc)| acc.finish(date))
            .collect()
    }
}
