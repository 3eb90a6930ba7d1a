//! Forecast run results
//!
//! `ForecastOutcome` is what a pipeline run hands to the presentation layer:
//! either a populated `ForecastReport` or the distinct "no data" state when
//! every provider came back empty. The report also provides the table and
//! chart projections the presentation layer renders.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use domain::{DomainError, DryingEstimate, GeoLocation, MergedDayRecord, ProviderId};
use serde::{Deserialize, Serialize};

/// Non-fatal problem with one provider during a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceWarning {
    pub provider: ProviderId,
    pub message: String,
}

impl fmt::Display for SourceWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.provider, self.message)
    }
}

/// Merged forecast plus the drying estimate for one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastReport {
    pub location: GeoLocation,
    pub generated_at: DateTime<Utc>,
    /// Merged days in ascending date order, never empty
    pub days: Vec<MergedDayRecord>,
    /// Computed once over `days`
    pub drying_estimate: DryingEstimate,
    /// Threshold the estimate was computed against
    pub drying_threshold: f64,
    /// Providers that produced at least one day
    pub contributing_sources: Vec<ProviderId>,
    pub warnings: Vec<SourceWarning>,
}

/// Result of a forecast run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ForecastOutcome {
    /// At least one provider returned data
    Available(ForecastReport),
    /// Every provider was unavailable or empty
    NoData { warnings: Vec<SourceWarning> },
}

impl ForecastOutcome {
    #[must_use]
    pub const fn report(&self) -> Option<&ForecastReport> {
        match self {
            Self::Available(report) => Some(report),
            Self::NoData { .. } => None,
        }
    }

    #[must_use]
    pub fn warnings(&self) -> &[SourceWarning] {
        match self {
            Self::Available(report) => &report.warnings,
            Self::NoData { warnings } => warnings,
        }
    }

    #[must_use]
    pub const fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData { .. })
    }
}

/// One row of the forecast table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastTableRow {
    pub date: NaiveDate,
    pub rain_probability: f64,
    pub temperature: f64,
    pub wind_speed: f64,
    pub humidity: f64,
    pub dew_point: f64,
    pub solar_radiation: Option<f64>,
    pub soil_moisture: Option<f64>,
    pub estimated_dry_day: DryingEstimate,
}

/// One point of the rain probability chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RainProbabilityPoint {
    pub date: NaiveDate,
    pub rain_probability: f64,
}

impl ForecastReport {
    /// Table rows in date order, each stamped with the run's drying estimate
    #[must_use]
    pub fn table_rows(&self) -> Vec<ForecastTableRow> {
        self.days
            .iter()
            .map(|day| ForecastTableRow {
                date: day.date,
                rain_probability: day.precipitation_probability,
                temperature: day.temperature,
                wind_speed: day.wind_speed,
                humidity: day.humidity,
                dew_point: day.dew_point,
                solar_radiation: day.solar_radiation,
                soil_moisture: day.soil_moisture,
                estimated_dry_day: self.drying_estimate,
            })
            .collect()
    }

    /// Date to rain probability series for charting
    #[must_use]
    pub fn rain_probability_series(&self) -> Vec<RainProbabilityPoint> {
        self.days
            .iter()
            .map(|day| RainProbabilityPoint {
                date: day.date,
                rain_probability: day.precipitation_probability,
            })
            .collect()
    }

    /// Calendar date of the estimated drying day
    #[must_use]
    pub fn drying_date(&self) -> Option<NaiveDate> {
        let index = self.drying_estimate.day_index()?;
        let offset = usize::try_from(index).ok()?.checked_sub(1)?;
        self.days.get(offset).map(|day| day.date)
    }
}

/// Sortable table column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableColumn {
    #[default]
    Date,
    RainProbability,
    Temperature,
    Wind,
    Humidity,
    DewPoint,
    SolarRadiation,
    SoilMoisture,
    EstimatedDryDay,
}

impl TableColumn {
    pub const ALL: [Self; 9] = [
        Self::Date,
        Self::RainProbability,
        Self::Temperature,
        Self::Wind,
        Self::Humidity,
        Self::DewPoint,
        Self::SolarRadiation,
        Self::SoilMoisture,
        Self::EstimatedDryDay,
    ];

    /// Column header as shown in the table
    #[must_use]
    pub const fn header(&self) -> &'static str {
        match self {
            Self::Date => "Date",
            Self::RainProbability => "Rain %",
            Self::Temperature => "Temp °C",
            Self::Wind => "Wind km/h",
            Self::Humidity => "Humidity %",
            Self::DewPoint => "Dew °C",
            Self::SolarRadiation => "Solar",
            Self::SoilMoisture => "Soil",
            Self::EstimatedDryDay => "Dry day",
        }
    }

    fn compare(self, a: &ForecastTableRow, b: &ForecastTableRow) -> Ordering {
        match self {
            Self::Date => a.date.cmp(&b.date),
            Self::RainProbability => a.rain_probability.total_cmp(&b.rain_probability),
            Self::Temperature => a.temperature.total_cmp(&b.temperature),
            Self::Wind => a.wind_speed.total_cmp(&b.wind_speed),
            Self::Humidity => a.humidity.total_cmp(&b.humidity),
            Self::DewPoint => a.dew_point.total_cmp(&b.dew_point),
            Self::SolarRadiation => compare_optional(a.solar_radiation, b.solar_radiation),
            Self::SoilMoisture => compare_optional(a.soil_moisture, b.soil_moisture),
            Self::EstimatedDryDay => a
                .estimated_dry_day
                .day_index()
                .cmp(&b.estimated_dry_day.day_index()),
        }
    }
}

impl FromStr for TableColumn {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "date" => Ok(Self::Date),
            "rain" | "rain_probability" | "pop" => Ok(Self::RainProbability),
            "temp" | "temperature" => Ok(Self::Temperature),
            "wind" | "wind_speed" => Ok(Self::Wind),
            "humidity" => Ok(Self::Humidity),
            "dew" | "dew_point" => Ok(Self::DewPoint),
            "solar" | "solar_radiation" => Ok(Self::SolarRadiation),
            "soil" | "soil_moisture" => Ok(Self::SoilMoisture),
            "dry_day" | "estimated_dry_day" => Ok(Self::EstimatedDryDay),
            _ => Err(DomainError::ValidationError(format!(
                "unknown table column: {s}"
            ))),
        }
    }
}

/// Unknown sorts before any reported value
fn compare_optional(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => x.total_cmp(&y),
    }
}

/// Stable sort of table rows by one column
pub fn sort_rows(rows: &mut [ForecastTableRow], column: TableColumn, descending: bool) {
    rows.sort_by(|a, b| {
        let ordering = column.compare(a, b);
        if descending {
            ordering.reverse()
        } else {
            ordering
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn merged(day: u32, rain: f64, temperature: f64, solar: Option<f64>) -> MergedDayRecord {
        MergedDayRecord {
            date: NaiveDate::from_ymd_opt(2024, 8, day).unwrap(),
            precipitation_probability: rain,
            temperature,
            wind_speed: 10.0,
            humidity: 55.0,
            dew_point: 8.0,
            solar_radiation: solar,
            soil_moisture: None,
            sources: vec![ProviderId::OpenMeteo],
        }
    }

    fn report(estimate: DryingEstimate) -> ForecastReport {
        ForecastReport {
            location: GeoLocation::london(),
            generated_at: Utc::now(),
            days: vec![
                merged(1, 80.0, 14.0, Some(10.0)),
                merged(2, 20.0, 19.0, None),
                merged(3, 50.0, 16.0, Some(22.0)),
            ],
            drying_estimate: estimate,
            drying_threshold: 3.0,
            contributing_sources: vec![ProviderId::OpenMeteo],
            warnings: Vec::new(),
        }
    }

    #[test]
    fn every_row_carries_the_same_estimate() {
        let estimate = DryingEstimate::reached_on(2).unwrap();
        let rows = report(estimate).table_rows();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|row| row.estimated_dry_day == estimate));
    }

    #[test]
    fn rain_series_follows_days() {
        let series = report(DryingEstimate::NotReached).rain_probability_series();
        let values: Vec<_> = series.iter().map(|p| p.rain_probability).collect();
        assert_eq!(values, vec![80.0, 20.0, 50.0]);
    }

    #[test]
    fn drying_date_resolves_index() {
        let reached = report(DryingEstimate::reached_on(3).unwrap());
        assert_eq!(reached.drying_date(), NaiveDate::from_ymd_opt(2024, 8, 3));
        assert_eq!(report(DryingEstimate::NotReached).drying_date(), None);
    }

    #[test]
    fn sort_by_rain_descending() {
        let mut rows = report(DryingEstimate::NotReached).table_rows();
        sort_rows(&mut rows, TableColumn::RainProbability, true);
        let values: Vec<_> = rows.iter().map(|r| r.rain_probability).collect();
        assert_eq!(values, vec![80.0, 50.0, 20.0]);
    }

    #[test]
    fn sort_unknown_solar_first_ascending() {
        let mut rows = report(DryingEstimate::NotReached).table_rows();
        sort_rows(&mut rows, TableColumn::SolarRadiation, false);
        let values: Vec<_> = rows.iter().map(|r| r.solar_radiation).collect();
        assert_eq!(values, vec![None, Some(10.0), Some(22.0)]);
    }

    #[test]
    fn sort_by_date_restores_order() {
        let mut rows = report(DryingEstimate::NotReached).table_rows();
        sort_rows(&mut rows, TableColumn::Temperature, true);
        sort_rows(&mut rows, TableColumn::Date, false);
        let days: Vec<_> = rows.iter().map(|r| r.date).collect();
        let expected: Vec<_> = report(DryingEstimate::NotReached)
            .days
            .iter()
            .map(|d| d.date)
            .collect();
        assert_eq!(days, expected);
    }

    #[test]
    fn column_names_parse() {
        assert_eq!("rain".parse::<TableColumn>().ok(), Some(TableColumn::RainProbability));
        assert_eq!("dew-point".parse::<TableColumn>().ok(), Some(TableColumn::DewPoint));
        assert!("pressure".parse::<TableColumn>().is_err());
    }

    #[test]
    fn no_data_outcome_exposes_warnings() {
        let outcome = ForecastOutcome::NoData {
            warnings: vec![SourceWarning {
                provider: ProviderId::Weatherbit,
                message: "missing 'data'".into(),
            }],
        };
        assert!(outcome.is_no_data());
        assert!(outcome.report().is_none());
        assert_eq!(outcome.warnings().len(), 1);
        assert_eq!(outcome.warnings()[0].to_string(), "Weatherbit: missing 'data'");
    }

    #[test]
    fn outcome_serializes_with_status_tag() {
        let json = serde_json::to_value(ForecastOutcome::NoData {
            warnings: Vec::new(),
        })
        .unwrap();
        assert_eq!(json["status"], "no_data");

        let json = serde_json::to_value(ForecastOutcome::Available(report(
            DryingEstimate::NotReached,
        )))
        .unwrap();
        assert_eq!(json["status"], "available");
        assert_eq!(json["days"].as_array().map(Vec::len), Some(3));
    }
}
