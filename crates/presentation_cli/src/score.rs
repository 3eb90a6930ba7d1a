//! Day records read from disk for the `score` command

use std::path::Path;

use anyhow::{Context, bail};
use domain::CanonicalDayRecord;
use serde_json::Value;

/// Read day records from `path`, sorted by date
///
/// # Errors
///
/// Returns an error if the file cannot be read or holds no day records.
pub fn load_day_records(path: &Path) -> anyhow::Result<Vec<CanonicalDayRecord>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_day_records(&contents).with_context(|| format!("invalid day records in {}", path.display()))
}

/// Parse a JSON array of records, or a report object with a `days` array
///
/// Merged records parse as well; their `sources` are ignored.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or holds no day records.
pub fn parse_day_records(json: &str) -> anyhow::Result<Vec<CanonicalDayRecord>> {
    let value: Value = serde_json::from_str(json)?;
    let days = match value {
        Value::Array(_) => value,
        Value::Object(mut object) => match object.remove("days") {
            Some(days) => days,
            None => bail!("expected an array of day records or an object with \"days\""),
        },
        _ => bail!("expected an array of day records or an object with \"days\""),
    };

    let mut records: Vec<CanonicalDayRecord> = serde_json::from_value(days)?;
    if records.is_empty() {
        bail!("no day records found");
    }
    records.sort_by_key(|record| record.date);
    Ok(records)
}
