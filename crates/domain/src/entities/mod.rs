//! Domain entities - Per-day forecast records

mod day_record;

pub use day_record::{CanonicalDayRecord, MergedDayRecord, SourceForecast};
