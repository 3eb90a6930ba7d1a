//! Lenient field extraction from provider JSON

use chrono::NaiveDate;
use domain::ProviderId;
use serde_json::{Map, Value};
use tracing::debug;

/// One forecast day inside a provider response
#[derive(Debug, Clone, Copy)]
pub(crate) enum Entry<'a> {
    /// A JSON object per day; field names may be dotted paths (`day.avgtemp_c`)
    Object(&'a Value),
    /// Row `index` of a table of parallel arrays (Open-Meteo `daily`)
    Column {
        table: &'a Map<String, Value>,
        index: usize,
    },
}

impl<'a> Entry<'a> {
    fn get(self, name: &str) -> Option<&'a Value> {
        match self {
            Self::Object(value) => name
                .split('.')
                .try_fold(value, |current, segment| current.get(segment)),
            Self::Column { table, index } => table.get(name)?.get(index),
        }
    }
}

/// Reads numeric fields from one entry, substituting 0 for missing required values
pub(crate) struct FieldReader<'a> {
    provider: ProviderId,
    entry: Entry<'a>,
    defaulted: Vec<&'static str>,
}

impl<'a> FieldReader<'a> {
    pub(crate) const fn new(provider: ProviderId, entry: Entry<'a>) -> Self {
        Self {
            provider,
            entry,
            defaulted: Vec::new(),
        }
    }

    /// Parse the entry date from `name`
    pub(crate) fn date(&self, name: &str) -> Option<NaiveDate> {
        self.entry.get(name).and_then(Value::as_str).and_then(parse_date)
    }

    /// A field the canonical record always carries; missing values become 0
    pub(crate) fn required(&mut self, name: &'static str) -> f64 {
        self.optional(name).unwrap_or_else(|| {
            self.defaulted.push(name);
            0.0
        })
    }

    /// A field that stays unknown when the provider omits it
    pub(crate) fn optional(&self, name: &str) -> Option<f64> {
        self.entry.get(name).and_then(as_number)
    }

    /// Record that a derived field had to be defaulted
    pub(crate) fn mark_defaulted(&mut self, name: &'static str) {
        self.defaulted.push(name);
    }

    /// The raw value behind `name`, for fields that need custom handling
    pub(crate) fn raw(&self, name: &str) -> Option<&'a Value> {
        self.entry.get(name)
    }

    /// Log substituted fields for the day
    pub(crate) fn finish(self, date: NaiveDate) {
        if !self.defaulted.is_empty() {
            debug!(
                provider = %self.provider,
                date = %date,
                fields = ?self.defaulted,
                "Missing fields substituted with 0"
            );
        }
    }
}

/// Accept JSON numbers and numeric strings
pub(crate) fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite())
}

/// Parse `YYYY-MM-DD`, ignoring any time suffix
pub(crate) fn parse_date(raw: &str) -> Option<NaiveDate> {
    let date = raw.get(..10)?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_and_numeric_strings() {
        assert_eq!(as_number(&json!(12.5)), Some(12.5));
        assert_eq!(as_number(&json!(" 7 ")), Some(7.0));
        assert_eq!(as_number(&json!("n/a")), None);
        assert_eq!(as_number(&Value::Null), None);
        assert_eq!(as_number(&json!(true)), None);
    }

    #[test]
    fn parse_date_accepts_timestamps() {
        let expected = NaiveDate::from_ymd_opt(2024, 6, 1);
        assert_eq!(parse_date("2024-06-01"), expected);
        assert_eq!(parse_date("2024-06-01T00:00"), expected);
        assert_eq!(parse_date("2024-13-01"), None);
        assert_eq!(parse_date("June"), None);
    }

    #[test]
    fn dotted_paths_resolve_nested_objects() {
        let day = json!({"day": {"avgtemp_c": 18.2}});
        let reader = FieldReader::new(ProviderId::WeatherApi, Entry::Object(&day));
        assert_eq!(reader.optional("day.avgtemp_c"), Some(18.2));
        assert_eq!(reader.optional("day.maxwind_kph"), None);
    }

    #[test]
    fn column_entries_index_parallel_arrays() {
        let daily = json!({"temperature_2m_max": [10.0, null, 12.0]});
        let table = daily.as_object().unwrap();
        let mut second = FieldReader::new(ProviderId::OpenMeteo, Entry::Column { table, index: 1 });
        let third = FieldReader::new(ProviderId::OpenMeteo, Entry::Column { table, index: 2 });

        assert_eq!(second.required("temperature_2m_max"), 0.0);
        assert_eq!(second.defaulted, vec!["temperature_2m_max"]);
        assert_eq!(third.optional("temperature_2m_max"), Some(12.0));
    }
}
