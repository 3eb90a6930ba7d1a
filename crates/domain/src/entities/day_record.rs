//! Per-day forecast records
//!
//! `CanonicalDayRecord` is one provider's view of one day, already normalized
//! to common units. `MergedDayRecord` is the cross-provider average for a
//! date. Optional measurements use `None` for "unknown" so that downstream
//! consumers can tell a missing reading apart from a reading of zero.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::value_objects::ProviderId;

/// One forecast day from one provider, in canonical units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalDayRecord {
    /// Calendar date of the forecast day
    pub date: NaiveDate,
    /// Probability of precipitation in percent (0-100)
    #[serde(default)]
    pub precipitation_probability: f64,
    /// Temperature in degrees Celsius
    #[serde(default)]
    pub temperature: f64,
    /// Wind speed in km/h
    #[serde(default)]
    pub wind_speed: f64,
    /// Relative humidity in percent (0-100)
    #[serde(default)]
    pub humidity: f64,
    /// Dew point in degrees Celsius
    #[serde(default)]
    pub dew_point: f64,
    /// Solar radiation, `None` when the provider does not supply it
    #[serde(default)]
    pub solar_radiation: Option<f64>,
    /// Volumetric soil moisture fraction (0-1), `None` when unknown
    #[serde(default)]
    pub soil_moisture: Option<f64>,
}

impl CanonicalDayRecord {
    /// A record for `date` with every required field zeroed and optional fields unknown
    #[must_use]
    pub const fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            precipitation_probability: 0.0,
            temperature: 0.0,
            wind_speed: 0.0,
            humidity: 0.0,
            dew_point: 0.0,
            solar_radiation: None,
            soil_moisture: None,
        }
    }
}

/// The ordered day records returned by a single provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceForecast {
    /// Provider the records came from
    pub provider: ProviderId,
    /// Records in the provider's native day order
    pub records: Vec<CanonicalDayRecord>,
}

impl SourceForecast {
    #[must_use]
    pub const fn new(provider: ProviderId, records: Vec<CanonicalDayRecord>) -> Self {
        Self { provider, records }
    }

    /// A provider that produced nothing
    #[must_use]
    pub const fn empty(provider: ProviderId) -> Self {
        Self {
            provider,
            records: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Cross-provider average for one calendar date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedDayRecord {
    /// Calendar date shared by all contributing records
    pub date: NaiveDate,
    /// Mean probability of precipitation in percent
    pub precipitation_probability: f64,
    /// Mean temperature in degrees Celsius
    pub temperature: f64,
    /// Mean wind speed in km/h
    pub wind_speed: f64,
    /// Mean relative humidity in percent
    pub humidity: f64,
    /// Mean dew point in degrees Celsius
    pub dew_point: f64,
    /// Mean solar radiation, `None` if no provider reported it
    pub solar_radiation: Option<f64>,
    /// Mean soil moisture fraction, `None` if no provider reported it
    pub soil_moisture: Option<f64>,
    /// Providers that had a record for this date, in input order
    pub sources: Vec<ProviderId>,
}

impl MergedDayRecord {
    /// Project back onto the canonical shape, dropping provenance
    #[must_use]
    pub const fn to_canonical(&self) -> CanonicalDayRecord {
        CanonicalDayRecord {
            date: self.date,
            precipitation_probability: self.precipitation_probability,
            temperature: self.temperature,
            wind_speed: self.wind_speed,
            humidity: self.humidity,
            dew_point: self.dew_point,
            solar_radiation: self.solar_radiation,
            soil_moisture: self.soil_moisture,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn empty_record_has_unknown_optionals() {
        let record = CanonicalDayRecord::empty(date("2024-05-01"));
        assert!(record.solar_radiation.is_none());
        assert!(record.soil_moisture.is_none());
        assert!(record.temperature.abs() < f64::EPSILON);
    }

    #[test]
    fn deserializes_with_missing_optional_fields() {
        let record: CanonicalDayRecord =
            serde_json::from_str(r#"{"date": "2024-05-01", "temperature": 18.5}"#).unwrap();
        assert_eq!(record.date, date("2024-05-01"));
        assert!((record.temperature - 18.5).abs() < f64::EPSILON);
        assert!(record.humidity.abs() < f64::EPSILON);
        assert!(record.solar_radiation.is_none());
    }

    #[test]
    fn unknown_serializes_as_null() {
        let record = CanonicalDayRecord::empty(date("2024-05-01"));
        let json = serde_json::to_value(&record).unwrap();
        assert!(json["solar_radiation"].is_null());
        assert!(json["soil_moisture"].is_null());
    }

    #[test]
    fn source_forecast_empty() {
        let source = SourceForecast::empty(ProviderId::Weatherbit);
        assert!(source.is_empty());
        assert_eq!(source.provider, ProviderId::Weatherbit);
    }

    #[test]
    fn merged_to_canonical_keeps_values() {
        let merged = MergedDayRecord {
            date: date("2024-05-02"),
            precipitation_probability: 40.0,
            temperature: 21.25,
            wind_speed: 12.0,
            humidity: 60.0,
            dew_point: 9.5,
            solar_radiation: Some(18.0),
            soil_moisture: None,
            sources: vec![ProviderId::OpenMeteo, ProviderId::Weatherbit],
        };
        let canonical = merged.to_canonical();
        assert_eq!(canonical.date, merged.date);
        assert_eq!(canonical.solar_radiation, Some(18.0));
        assert!(canonical.soil_moisture.is_none());
    }
}
