//! Drying day estimator
//!
//! Scores each forecast day for drying conditions and reports the first day
//! on which the running total meets the threshold.
//!
//! ```text
//! score = (temp / 40) * 0.3
//!       + (min(wind, 25) / 25) * 0.2
//!       + (1 - humidity / 100) * 0.2
//!       + (solar_or_15 / 30) * 0.2
//!       - (soil_or_0.3 / 0.6) * 0.2
//! ```
//!
//! A day's score is floored at zero before it is added to the running total.

use chrono::NaiveDate;
use domain::{CanonicalDayRecord, DryingEstimate, MergedDayRecord};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Cumulative score at which a day counts as dry
pub const DEFAULT_DRYING_THRESHOLD: f64 = 3.0;

/// Solar radiation assumed when no provider reported it
pub const DEFAULT_SOLAR_RADIATION: f64 = 15.0;

/// Soil moisture fraction assumed when no provider reported it
pub const DEFAULT_SOIL_MOISTURE: f64 = 0.3;

const TEMPERATURE_SCALE: f64 = 40.0;
const TEMPERATURE_WEIGHT: f64 = 0.3;
const WIND_CAP: f64 = 25.0;
const WIND_WEIGHT: f64 = 0.2;
const HUMIDITY_WEIGHT: f64 = 0.2;
const SOLAR_SCALE: f64 = 30.0;
const SOLAR_WEIGHT: f64 = 0.2;
const SOIL_SCALE: f64 = 0.6;
const SOIL_WEIGHT: f64 = 0.2;

/// Score of one day together with the running total up to and including it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyDryingScore {
    /// 1-based position in the sequence
    pub day_index: u32,
    pub date: NaiveDate,
    /// Day score after flooring at zero
    pub score: f64,
    /// Running total including this day
    pub cumulative: f64,
}

/// Threshold-crossing estimator over a day sequence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DryingEstimator {
    threshold: f64,
}

impl Default for DryingEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_DRYING_THRESHOLD)
    }
}

impl DryingEstimator {
    #[must_use]
    pub const fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    #[must_use]
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Drying score for a single day, floored at zero
    #[must_use]
    pub fn day_score(day: &CanonicalDayRecord) -> f64 {
        let solar = day.solar_radiation.unwrap_or(DEFAULT_SOLAR_RADIATION);
        let soil = day.soil_moisture.unwrap_or(DEFAULT_SOIL_MOISTURE);

        let score = (day.temperature / TEMPERATURE_SCALE) * TEMPERATURE_WEIGHT
            + (day.wind_speed.min(WIND_CAP) / WIND_CAP) * WIND_WEIGHT
            + (1.0 - day.humidity / 100.0) * HUMIDITY_WEIGHT
            + (solar / SOLAR_SCALE) * SOLAR_WEIGHT
            - (soil / SOIL_SCALE) * SOIL_WEIGHT;

        score.max(0.0)
    }

    /// Per-day and cumulative scores in sequence order
    #[must_use]
    pub fn daily_scores(&self, days: &[CanonicalDayRecord]) -> Vec<DailyDryingScore> {
        let mut cumulative = 0.0;
        days.iter()
            .zip(1u32..)
            .map(|(day, day_index)| {
                let score = Self::day_score(day);
                cumulative += score;
                DailyDryingScore {
                    day_index,
                    date: day.date,
                    score,
                    cumulative,
                }
            })
            .collect()
    }

    /// First day on which the cumulative score meets the threshold
    #[must_use]
    pub fn estimate_from_scores<I>(&self, scores: I) -> DryingEstimate
    where
        I: IntoIterator<Item = f64>,
    {
        let mut cumulative = 0.0;
        for (score, day_index) in scores.into_iter().zip(1u32..) {
            cumulative += score.max(0.0);
            if cumulative >= self.threshold {
                return DryingEstimate::reached_on(day_index).unwrap_or(DryingEstimate::NotReached);
            }
        }
        DryingEstimate::NotReached
    }

    /// Estimate over canonical records
    #[must_use]
    pub fn estimate_records(&self, days: &[CanonicalDayRecord]) -> DryingEstimate {
        self.estimate_from_scores(days.iter().map(Self::day_score))
    }

    /// Estimate over a merged, date-ascending forecast
    #[must_use]
    pub fn estimate(&self, days: &[MergedDayRecord]) -> DryingEstimate {
        let estimate = self.estimate_from_scores(
            days.iter()
                .map(|day| Self::day_score(&day.to_canonical())),
        );
        debug!(
            days = days.len(),
            threshold = self.threshold,
            estimate = %estimate,
            "Estimated drying day"
        );
        estimate
    }
}
