//! Application services - Use case implementations

mod drying_estimator;
mod forecast_merger;
mod forecast_service;

pub use drying_estimator::{
    DEFAULT_DRYING_THRESHOLD, DEFAULT_SOIL_MOISTURE, DEFAULT_SOLAR_RADIATION, DailyDryingScore,
    DryingEstimator,
};
pub use forecast_merger::{ForecastMerger, MissingValuePolicy, round_to_hundredths};
pub use forecast_service::{ForecastService, SourceFetch};
