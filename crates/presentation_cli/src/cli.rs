//! Command-line arguments

use std::path::PathBuf;

use application::TableColumn;
use clap::{Args, Parser, Subcommand, ValueEnum};

/// drycast CLI
#[derive(Debug, Parser)]
#[command(name = "drycast")]
#[command(
    author,
    version,
    about = "Multi-provider weather forecast with a drying-day estimate",
    long_about = None
)]
pub struct Cli {
    /// Verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (default: ./drycast.toml if present)
    #[arg(short, long, global = true, env = "DRYCAST_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fetch, merge and display the forecast
    Forecast(ForecastArgs),

    /// List providers and whether each will be queried
    Providers,

    /// Score day records from a JSON file
    ///
    /// Accepts a JSON array of day records or a saved forecast report.
    /// Example: drycast score --file forecast.json
    Score {
        /// JSON file with day records
        #[arg(short, long)]
        file: PathBuf,

        /// Override the configured drying threshold
        #[arg(long)]
        threshold: Option<f64>,
    },
}

#[derive(Debug, Args)]
pub struct ForecastArgs {
    /// Latitude override (requires --lon)
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude override (requires --lat)
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Number of forecast days (1-16)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=16))]
    pub days: Option<u8>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Column to sort the table by (date, rain, temp, wind, humidity, dew, solar, soil, dry_day)
    #[arg(long, default_value = "date")]
    pub sort_by: TableColumn,

    /// Sort in descending order
    #[arg(long)]
    pub descending: bool,

    /// Do not draw the rain probability chart
    #[arg(long)]
    pub no_chart: bool,
}

/// How `forecast` prints its result
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Determine log filter level from verbosity count
///
/// `None` leaves the configured filter in place.
#[must_use]
pub const fn log_filter_from_verbosity(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}
