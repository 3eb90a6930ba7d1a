//! drycast CLI
//!
//! Fetches forecasts from the configured providers, merges them by date and
//! estimates when the ground will be dry.

#![allow(clippy::print_stdout)]

use anyhow::Context;
use application::{DryingEstimator, ForecastOutcome};
use clap::Parser;
use domain::GeoLocation;
use infrastructure::{AppConfig, build_forecast_service, init_logging, provider_statuses};
use presentation_cli::cli::{Cli, Commands, ForecastArgs, OutputFormat, log_filter_from_verbosity};
use presentation_cli::{render, score};
use tracing::info;

/// Exit code when no provider returned forecast data
const EXIT_NO_DATA: i32 = 2;

async fn run_forecast(mut config: AppConfig, args: ForecastArgs) -> anyhow::Result<()> {
    if let (Some(lat), Some(lon)) = (args.lat, args.lon) {
        config.location = GeoLocation::new(lat, lon)?;
    }
    if let Some(days) = args.days {
        config.forecast_days = days;
    }

    let service = build_forecast_service(&config)?;
    let outcome = service.run(&config.location).await;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
        OutputFormat::Table => match &outcome {
            ForecastOutcome::Available(report) => print!(
                "{}",
                render::render_report(report, args.sort_by, args.descending, !args.no_chart)
            ),
            ForecastOutcome::NoData { warnings } => print!("{}", render::render_no_data(warnings)),
        },
    }

    if outcome.is_no_data() {
        std::process::exit(EXIT_NO_DATA);
    }
    Ok(())
}

fn run_score(config: &AppConfig, file: &std::path::Path, threshold: Option<f64>) -> anyhow::Result<()> {
    let threshold = threshold.unwrap_or(config.drying.threshold);
    anyhow::ensure!(
        threshold.is_finite() && threshold > 0.0,
        "threshold must be a positive number, got {threshold}"
    );

    let records = score::load_day_records(file)?;
    let estimator = DryingEstimator::new(threshold);
    let scores = estimator.daily_scores(&records);
    let estimate = estimator.estimate_records(&records);
    info!(days = records.len(), estimate = %estimate, "Scored day records");

    print!("{}", render::render_scores(&scores, estimate, threshold));
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    init_logging(&config.logging, log_filter_from_verbosity(cli.verbose))?;

    match cli.command {
        Commands::Forecast(args) => run_forecast(config, args).await?,
        Commands::Providers => print!("{}", render::render_providers(&provider_statuses(&config))),
        Commands::Score { file, threshold } => run_score(&config, &file, threshold)?,
    }

    Ok(())
}
