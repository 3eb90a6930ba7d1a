//! WeatherAPI.com forecast adapter

use domain::{CanonicalDayRecord, GeoLocation, ProviderId};
use serde_json::Value;

use super::{ProviderAdapter, clamp_days, missing_data, require_key, skip_undated, with_query};
use crate::config::ProviderEndpoint;
use crate::error::WeatherError;
use crate::fields::{Entry, FieldReader, as_number};

pub(crate) const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1";

const DATA_KEY: &str = "forecast.forecastday";

/// Adapter for `api.weatherapi.com` `/forecast.json`
#[derive(Debug, Clone)]
pub struct WeatherApiAdapter {
    endpoint: ProviderEndpoint,
}

impl WeatherApiAdapter {
    #[must_use]
    pub const fn new(endpoint: ProviderEndpoint) -> Self {
        Self { endpoint }
    }
}

impl Default for WeatherApiAdapter {
    fn default() -> Self {
        Self::new(ProviderEndpoint::new(DEFAULT_BASE_URL))
    }
}

/// Daily dew point is not reported; average the hourly values instead
fn mean_hourly_dew_point(hours: Option<&Value>) -> Option<f64> {
    let values: Vec<f64> = hours?
        .as_array()?
        .iter()
        .filter_map(|hour| hour.get("dewpoint_c").and_then(as_number))
        .collect();

    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

impl ProviderAdapter for WeatherApiAdapter {
    fn provider(&self) -> ProviderId {
        ProviderId::WeatherApi
    }

    fn forecast_url(&self, location: &GeoLocation, days: u8) -> Result<String, WeatherError> {
        let key = require_key(&self.endpoint, self.provider())?;
        with_query(
            &format!("{}/forecast.json", self.endpoint.base_url),
            &[
                ("key", key.to_string()),
                ("q", format!("{},{}", location.latitude(), location.longitude())),
                ("days", clamp_days(days).to_string()),
                ("aqi", "no".to_string()),
                ("alerts", "no".to_string()),
            ],
        )
    }

    fn normalize(
        &self,
        response: &Value,
        max_days: u8,
    ) -> Result<Vec<CanonicalDayRecord>, WeatherError> {
        let provider = self.provider();
        let entries = response
            .get("forecast")
            .and_then(|forecast| forecast.get("forecastday"))
            .and_then(Value::as_array)
            .ok_or_else(|| missing_data(provider, DATA_KEY, response))?;

        let records = entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                let mut reader = FieldReader::new(provider, Entry::Object(entry));
                let Some(date) = reader.date("date") else {
                    skip_undated(provider, index);
                    return None;
                };

                let dew_point = mean_hourly_dew_point(reader.raw("hour")).unwrap_or_else(|| {
                    reader.mark_defaulted("hour.dewpoint_c");
                    0.0
                });
                let record = CanonicalDayRecord {
                    date,
                    precipitation_probability: reader.required("day.daily_chance_of_rain"),
                    temperature: reader.required("day.avgtemp_c"),
                    wind_speed: reader.required("day.maxwind_kph"),
                    humidity: reader.required("day.avghumidity"),
                    dew_point,
                    solar_radiation: None,
                    soil_moisture: None,
                };
                reader.finish(date);
                Some(record)
            })
            .take(usize::from(max_days))
            .collect();

        Ok(records)
    }
}
