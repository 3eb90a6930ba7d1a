//! Application layer - Use cases and orchestration
//!
//! Merges per-provider forecasts, estimates the drying day and orchestrates
//! a full forecast run over the configured sources. Data sources are reached
//! through ports implemented in the infrastructure layer.

pub mod error;
pub mod ports;
pub mod report;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use report::{
    ForecastOutcome, ForecastReport, ForecastTableRow, RainProbabilityPoint, SourceWarning,
    TableColumn, sort_rows,
};
pub use services::*;
