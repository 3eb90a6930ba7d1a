//! Weatherbit daily forecast adapter

use domain::{CanonicalDayRecord, GeoLocation, ProviderId};
use serde_json::Value;

use super::{ProviderAdapter, clamp_days, missing_data, require_key, skip_undated, with_query};
use crate::config::ProviderEndpoint;
use crate::error::WeatherError;
use crate::fields::{Entry, FieldReader};

pub(crate) const DEFAULT_BASE_URL: &str = "https://api.weatherbit.io/v2.0";

const DATA_KEY: &str = "data";

/// Weatherbit reports wind in m/s
const MS_TO_KMH: f64 = 3.6;

/// Adapter for `api.weatherbit.io` `/forecast/daily`
#[derive(Debug, Clone)]
pub struct WeatherbitAdapter {
    endpoint: ProviderEndpoint,
}

impl WeatherbitAdapter {
    #[must_use]
    pub const fn new(endpoint: ProviderEndpoint) -> Self {
        Self { endpoint }
    }
}

impl Default for WeatherbitAdapter {
    fn default() -> Self {
        Self::new(ProviderEndpoint::new(DEFAULT_BASE_URL))
    }
}

impl ProviderAdapter for WeatherbitAdapter {
    fn provider(&self) -> ProviderId {
        ProviderId::Weatherbit
    }

    fn forecast_url(&self, location: &GeoLocation, days: u8) -> Result<String, WeatherError> {
        let key = require_key(&self.endpoint, self.provider())?;
        with_query(
            &format!("{}/forecast/daily", self.endpoint.base_url),
            &[
                ("lat", location.latitude().to_string()),
                ("lon", location.longitude().to_string()),
                ("key", key.to_string()),
                ("days", clamp_days(days).to_string()),
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
            .get(DATA_KEY)
            .and_then(Value::as_array)
            .ok_or_else(|| missing_data(provider, DATA_KEY, response))?;

        let records = entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                let mut reader = FieldReader::new(provider, Entry::Object(entry));
                let Some(date) = reader.date("valid_date") else {
                    skip_undated(provider, index);
                    return None;
                };

                let record = CanonicalDayRecord {
                    date,
                    precipitation_probability: reader.required("pop"),
                    temperature: reader.required("temp"),
                    wind_speed: reader.required("wind_spd") * MS_TO_KMH,
                    humidity: reader.required("rh"),
                    dew_point: reader.required("dewpt"),
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
