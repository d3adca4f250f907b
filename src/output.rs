//! Output formatting and persistence for curve reports.
//!
//! Supports pretty-printing, JSON serialization, and CSV export.

use anyhow::Result;
use tracing::{debug, info};

use crate::pipeline::types::CurveReport;
use csv::WriterBuilder;
use std::path::Path;

/// Logs a curve report using Rust's debug pretty-print format.
pub fn print_pretty(report: &CurveReport) {
    debug!("{:#?}", report);
}

/// Logs a curve report as pretty-printed JSON.
///
/// Non-finite growth values serialize as JSON null.
pub fn print_json(report: &CurveReport) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// Writes a [`CurveReport`] as a CSV file, one quantile per row.
///
/// The file is truncated if it already exists; a run produces a complete
/// report, never a partial append.
pub fn write_report_csv(path: &str, report: &CurveReport) -> Result<()> {
    debug!(path, "Writing report CSV");

    let mut writer = WriterBuilder::new().from_path(path)?;

    for point in &report.points {
        writer.serialize(point)?;
    }
    writer.flush()?;

    info!(path, rows = report.points.len(), "Report CSV written");
    Ok(())
}

/// True when a report path already exists, used by the CLI to log overwrites.
pub fn report_exists(path: &str) -> bool {
    Path::new(path).exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::curve::{build, report};
    use crate::pipeline::types::{QUANTILE_COUNT, QuantileSummary};
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", std::env::temp_dir().display(), name)
    }

    fn sample_report() -> CurveReport {
        let early = QuantileSummary {
            year: 1988,
            sample: 1,
            means: vec![100.0; QUANTILE_COUNT],
        };
        let late = QuantileSummary {
            year: 2008,
            sample: 1,
            means: vec![140.0; QUANTILE_COUNT],
        };
        let curve = build(&early, &late).unwrap();
        report(&early, &late, &curve)
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        print_pretty(&sample_report());
    }

    #[test]
    fn test_print_json_does_not_panic() {
        print_json(&sample_report()).unwrap();
    }

    #[test]
    fn test_write_report_csv_creates_file() {
        let path = temp_path("elephant_curve_test_report.csv");
        let _ = fs::remove_file(&path); // clean up any prior run

        write_report_csv(&path, &sample_report()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        // 1 header + 20 quantile rows
        assert_eq!(content.lines().count(), 1 + QUANTILE_COUNT);
        assert!(content.lines().next().unwrap().contains("growth"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_report_csv_truncates() {
        let path = temp_path("elephant_curve_test_truncate.csv");
        let _ = fs::remove_file(&path);

        write_report_csv(&path, &sample_report()).unwrap();
        write_report_csv(&path, &sample_report()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        // still exactly one header and one run's worth of rows
        assert_eq!(content.lines().count(), 1 + QUANTILE_COUNT);

        fs::remove_file(&path).unwrap();
    }
}
