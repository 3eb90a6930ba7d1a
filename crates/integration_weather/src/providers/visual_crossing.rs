//! Visual Crossing timeline adapter

use domain::{CanonicalDayRecord, GeoLocation, ProviderId};
use serde_json::Value;

use super::{ProviderAdapter, missing_data, require_key, skip_undated, with_query};
use crate::config::ProviderEndpoint;
use crate::error::WeatherError;
use crate::fields::{Entry, FieldReader};

pub(crate) const DEFAULT_BASE_URL: &str =
    "https://weather.visualcrossing.com/VisualCrossingWebServices/rest/services";

const DATA_KEY: &str = "days";

/// Adapter for the Visual Crossing timeline API
///
/// The timeline endpoint always returns its full 15-day window, so the
/// requested day count only limits normalization.
#[derive(Debug, Clone)]
pub struct VisualCrossingAdapter {
    endpoint: ProviderEndpoint,
}

impl VisualCrossingAdapter {
    #[must_use]
    pub const fn new(endpoint: ProviderEndpoint) -> Self {
        Self { endpoint }
    }
}

impl Default for VisualCrossingAdapter {
    fn default() -> Self {
        Self::new(ProviderEndpoint::new(DEFAULT_BASE_URL))
    }
}

impl ProviderAdapter for VisualCrossingAdapter {
    fn provider(&self) -> ProviderId {
        ProviderId::VisualCrossing
    }

    fn forecast_url(&self, location: &GeoLocation, _days: u8) -> Result<String, WeatherError> {
        let key = require_key(&self.endpoint, self.provider())?;
        with_query(
            &format!(
                "{}/timeline/{},{}",
                self.endpoint.base_url,
                location.latitude(),
                location.longitude()
            ),
            &[
                ("unitGroup", "metric".to_string()),
                ("key", key.to_string()),
                ("include", "days".to_string()),
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
                let Some(date) = reader.date("datetime") else {
                    skip_undated(provider, index);
                    return None;
                };

                let record = CanonicalDayRecord {
                    date,
                    precipitation_probability: reader.required("precipprob"),
                    temperature: reader.required("temp"),
                    wind_speed: reader.required("windspeed"),
                    humidity: reader.required("humidity"),
                    dew_point: reader.required("dew"),
                    solar_radiation: reader.optional("solarradiation"),
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
