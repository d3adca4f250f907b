//! CLI entry point for the elephant-curve tool.
//!
//! Provides subcommands for computing the full 1988-2008 growth curve from
//! the LM-WPID survey and for inspecting a single year's quantile summary.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use elephant_curve::loader::{SURVEY_YEARS, load_survey};
use elephant_curve::output::{print_json, print_pretty, report_exists, write_report_csv};
use elephant_curve::pipeline::aggregate::summarize;
use elephant_curve::pipeline::curve::{build, report};
use elephant_curve::render::render_svg;
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// The two analysis years the curve is defined over.
const BASE_YEAR: u16 = 1988;
const COMPARISON_YEAR: u16 = 2008;

#[derive(Parser)]
#[command(name = "elephant_curve")]
#[command(about = "Compute the elephant curve from LM-WPID survey data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the 1988-2008 growth curve and write the report
    Curve {
        /// Path to the LM-WPID survey CSV
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// CSV file to write the per-quantile report to
        #[arg(short, long, default_value = "elephant.csv")]
        output: String,

        /// Optional SVG file to render the curve to
        #[arg(long)]
        svg: Option<String>,

        /// Sample flag: 0 = whole countries, 1 = rural/urban split
        #[arg(short, long, default_value_t = 1)]
        sample: u8,
    },
    /// Print one year's quantile summary as JSON
    Summary {
        /// Path to the LM-WPID survey CSV
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Survey year to summarize
        #[arg(short, long)]
        year: u16,

        /// Sample flag: 0 = whole countries, 1 = rural/urban split
        #[arg(short, long, default_value_t = 1)]
        sample: u8,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/elephant_curve.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("elephant_curve.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Curve {
            input,
            output,
            svg,
            sample,
        } => run_curve(&input, &output, svg.as_deref(), sample)?,
        Commands::Summary {
            input,
            year,
            sample,
        } => run_summary(&input, year, sample)?,
    }

    Ok(())
}

/// Runs the full pipeline: load, summarize both analysis years, combine,
/// write the CSV report and optionally the SVG chart.
#[tracing::instrument(skip(input, output, svg), fields(input = %input.display(), sample))]
fn run_curve(input: &Path, output: &str, svg: Option<&str>, sample: u8) -> Result<()> {
    let records = load_survey(input)?;
    info!(rows = records.len(), "Survey loaded");

    let early = summarize(&records, BASE_YEAR, sample);
    let late = summarize(&records, COMPARISON_YEAR, sample);
    let curve = build(&early, &late)?;
    let curve_report = report(&early, &late, &curve);

    print_pretty(&curve_report);
    print_json(&curve_report)?;

    if report_exists(output) {
        warn!(output, "Report file exists, overwriting");
    }
    write_report_csv(output, &curve_report)?;

    if let Some(svg_path) = svg {
        render_svg(&curve_report, svg_path)?;
    }

    Ok(())
}

/// Summarizes a single (year, sample) selection and prints it as JSON.
#[tracing::instrument(skip(input), fields(input = %input.display(), year, sample))]
fn run_summary(input: &Path, year: u16, sample: u8) -> Result<()> {
    if !SURVEY_YEARS.contains(&year) {
        warn!(year, "Year is not one of the LM-WPID survey years");
    }

    let records = load_survey(input)?;
    let summary = summarize(&records, year, sample);

    info!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
