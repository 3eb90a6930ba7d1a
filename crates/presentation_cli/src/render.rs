//! Text rendering for forecast tables, the rain chart and drying scores

use std::fmt::Write as _;

use application::{
    DailyDryingScore, ForecastReport, ForecastTableRow, RainProbabilityPoint, SourceWarning,
    TableColumn, sort_rows,
};
use domain::DryingEstimate;
use infrastructure::ProviderStatus;

/// Width of a 100 % bar in the rain chart
const CHART_WIDTH: usize = 40;

fn value(v: f64) -> String {
    format!("{v:.2}")
}

fn optional(v: Option<f64>) -> String {
    v.map_or_else(|| "-".to_string(), value)
}

fn grid_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, &width))| {
            if i == 0 {
                format!("{cell:<width$}")
            } else {
                format!("{cell:>width$}")
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// Lay out `rows` under `headers`; the first column is left-aligned
fn grid(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let _ = writeln!(out, "{}", grid_line(headers.iter().copied(), &widths));
    let total = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    let _ = writeln!(out, "{}", "-".repeat(total));
    for row in rows {
        let _ = writeln!(out, "{}", grid_line(row.iter().map(String::as_str), &widths));
    }
    out
}

/// Forecast table with one row per merged day
#[must_use]
pub fn render_table(rows: &[ForecastTableRow]) -> String {
    let headers: Vec<&str> = TableColumn::ALL.iter().map(TableColumn::header).collect();
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            vec![
                row.date.to_string(),
                value(row.rain_probability),
                value(row.temperature),
                value(row.wind_speed),
                value(row.humidity),
                value(row.dew_point),
                optional(row.solar_radiation),
                optional(row.soil_moisture),
                row.estimated_dry_day.to_string(),
            ]
        })
        .collect();
    grid(&headers, &cells)
}

/// Horizontal bar chart of rain probability by date
#[must_use]
pub fn render_rain_chart(points: &[RainProbabilityPoint]) -> String {
    let mut out = String::from("Rain probability\n");
    for point in points {
        let clamped = point.rain_probability.clamp(0.0, 100.0);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let filled = ((clamped / 100.0) * CHART_WIDTH as f64).round() as usize;
        let _ = writeln!(
            out,
            "{} |{}{}| {:>3.0}%",
            point.date,
            "#".repeat(filled),
            " ".repeat(CHART_WIDTH - filled),
            point.rain_probability
        );
    }
    out
}

fn render_warnings(out: &mut String, warnings: &[SourceWarning]) {
    for warning in warnings {
        let _ = writeln!(out, "warning: {warning}");
    }
}

fn estimate_line(estimate: DryingEstimate, date: Option<chrono::NaiveDate>) -> String {
    match (estimate, date) {
        (DryingEstimate::Reached(_), Some(date)) => {
            format!("Estimated dry day: {estimate} ({date})")
        },
        _ => format!("Estimated dry day: {estimate}"),
    }
}

/// Full forecast output: summary, sorted table, estimate and optional chart
#[must_use]
pub fn render_report(
    report: &ForecastReport,
    sort_by: TableColumn,
    descending: bool,
    chart: bool,
) -> String {
    let mut out = String::new();
    let sources: Vec<&str> = report
        .contributing_sources
        .iter()
        .map(|p| p.display_name())
        .collect();
    let _ = writeln!(out, "Forecast for {}", report.location);
    let _ = writeln!(out, "Sources: {}", sources.join(", "));
    render_warnings(&mut out, &report.warnings);
    out.push('\n');

    let mut rows = report.table_rows();
    sort_rows(&mut rows, sort_by, descending);
    out.push_str(&render_table(&rows));
    out.push('\n');
    let _ = writeln!(
        out,
        "{} (threshold {})",
        estimate_line(report.drying_estimate, report.drying_date()),
        report.drying_threshold
    );

    if chart {
        out.push('\n');
        out.push_str(&render_rain_chart(&report.rain_probability_series()));
    }
    out
}

/// Output when every provider came back empty
#[must_use]
pub fn render_no_data(warnings: &[SourceWarning]) -> String {
    let mut out = String::from("No forecast data available\n");
    render_warnings(&mut out, warnings);
    out
}

/// Per-day and cumulative drying scores
#[must_use]
pub fn render_scores(scores: &[DailyDryingScore], estimate: DryingEstimate, threshold: f64) -> String {
    let cells: Vec<Vec<String>> = scores
        .iter()
        .map(|s| {
            vec![
                s.day_index.to_string(),
                s.date.to_string(),
                format!("{:.3}", s.score),
                format!("{:.3}", s.cumulative),
            ]
        })
        .collect();

    let mut out = grid(&["Day", "Date", "Score", "Cumulative"], &cells);
    let date = estimate
        .day_index()
        .and_then(|index| scores.iter().find(|s| s.day_index == index))
        .map(|s| s.date);
    let _ = writeln!(out, "\n{} (threshold {threshold})", estimate_line(estimate, date));
    out
}

/// Provider list for `drycast providers`
#[must_use]
pub fn render_providers(statuses: &[ProviderStatus]) -> String {
    let cells: Vec<Vec<String>> = statuses
        .iter()
        .map(|s| {
            vec![
                s.provider.display_name().to_string(),
                s.provider.as_str().to_string(),
                s.describe().to_string(),
                if s.requires_api_key {
                    if s.api_key_configured { "configured" } else { "missing" }
                } else {
                    "not needed"
                }
                .to_string(),
                s.base_url.clone(),
            ]
        })
        .collect();
    grid(&["Provider", "Key", "State", "API key", "Base URL"], &cells)
}
