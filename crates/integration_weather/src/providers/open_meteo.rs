//! Open-Meteo daily forecast adapter
//!
//! Open-Meteo returns `daily` as parallel arrays indexed by `daily.time`.
//! No API key is needed.

use domain::{CanonicalDayRecord, GeoLocation, ProviderId};
use serde_json::Value;

use super::{ProviderAdapter, clamp_days, missing_data, skip_undated};
use crate::config::ProviderEndpoint;
use crate::error::WeatherError;
use crate::fields::{Entry, FieldReader};

pub(crate) const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com/v1";

const DATA_KEY: &str = "daily";

const DAILY_FIELDS: [&str; 7] = [
    "precipitation_probability_mean",
    "temperature_2m_max",
    "windspeed_10m_max",
    "relative_humidity_2m_mean",
    "dew_point_2m_mean",
    "shortwave_radiation_sum",
    "soil_moisture_0_to_1cm_mean",
];

/// Adapter for `api.open-meteo.com` `/forecast`
#[derive(Debug, Clone)]
pub struct OpenMeteoAdapter {
    endpoint: ProviderEndpoint,
}

impl OpenMeteoAdapter {
    #[must_use]
    pub const fn new(endpoint: ProviderEndpoint) -> Self {
        Self { endpoint }
    }
}

impl Default for OpenMeteoAdapter {
    fn default() -> Self {
        Self::new(ProviderEndpoint::new(DEFAULT_BASE_URL))
    }
}

impl ProviderAdapter for OpenMeteoAdapter {
    fn provider(&self) -> ProviderId {
        ProviderId::OpenMeteo
    }

    fn forecast_url(&self, location: &GeoLocation, days: u8) -> Result<String, WeatherError> {
        Ok(format!(
            "{}/forecast?latitude={}&longitude={}&daily={}&timezone=auto&forecast_days={}",
            self.endpoint.base_url,
            location.latitude(),
            location.longitude(),
            DAILY_FIELDS.join(","),
            clamp_days(days)
        ))
    }

    fn normalize(
        &self,
        response: &Value,
        max_days: u8,
    ) -> Result<Vec<CanonicalDayRecord>, WeatherError> {
        let provider = self.provider();
        let table = response
            .get(DATA_KEY)
            .and_then(Value::as_object)
            .ok_or_else(|| missing_data(provider, DATA_KEY, response))?;
        let dates = table
            .get("time")
            .and_then(Value::as_array)
            .ok_or_else(|| missing_data(provider, "daily.time", response))?;

        let records = (0..dates.len())
            .filter_map(|index| {
                let mut reader = FieldReader::new(provider, Entry::Column { table, index });
                let Some(date) = reader.date("time") else {
                    skip_undated(provider, index);
                    return None;
                };

                let record = CanonicalDayRecord {
                    date,
                    precipitation_probability: reader.required("precipitation_probability_mean"),
                    temperature: reader.required("temperature_2m_max"),
                    wind_speed: reader.required("windspeed_10m_max"),
                    humidity: reader.required("relative_humidity_2m_mean"),
                    dew_point: reader.required("dew_point_2m_mean"),
                    solar_radiation: reader.optional("shortwave_radiation_sum"),
                    soil_moisture: reader.optional("soil_moisture_0_to_1cm_mean"),
                };
                reader.finish(date);
                Some(record)
            })
            .take(usize::from(max_days))
            .collect();

        Ok(records)
    }
}
