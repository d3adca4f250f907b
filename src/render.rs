//! SVG rendering of a curve report as a single 2-D line chart.
//!
//! x = quantile index 0..19, y = growth ratio. Presentation only; the
//! numerical contract lives in the pipeline.

use std::fmt::Write as _;
use std::fs;

use anyhow::{Result, bail};
use tracing::info;

use crate::pipeline::types::{CurveReport, QUANTILE_COUNT};

const WIDTH: f64 = 720.0;
const HEIGHT: f64 = 440.0;
const MARGIN_LEFT: f64 = 64.0;
const MARGIN_RIGHT: f64 = 24.0;
const MARGIN_TOP: f64 = 36.0;
const MARGIN_BOTTOM: f64 = 48.0;

/// Renders the report's growth curve as an SVG line chart at `path`.
///
/// Quantiles with a non-finite growth value are omitted from the line.
///
/// # Errors
///
/// Returns an error if no quantile has a finite growth value, or if the
/// file cannot be written.
pub fn render_svg(report: &CurveReport, path: &str) -> Result<()> {
    let svg = curve_svg(report)?;
    fs::write(path, svg)?;
    info!(path, "Curve SVG written");
    Ok(())
}

fn curve_svg(report: &CurveReport) -> Result<String> {
    let finite: Vec<(usize, f64)> = report
        .points
        .iter()
        .filter(|p| p.growth.is_finite())
        .map(|p| (p.quantile, p.growth))
        .collect();

    if finite.is_empty() {
        bail!("no finite growth values to plot");
    }

    let y_min = finite.iter().map(|&(_, g)| g).fold(f64::INFINITY, f64::min);
    let y_max = finite
        .iter()
        .map(|&(_, g)| g)
        .fold(f64::NEG_INFINITY, f64::max);
    // pad the range so the line never touches the frame
    let span = (y_max - y_min).max(1e-9);
    let y_lo = y_min - span * 0.05;
    let y_hi = y_max + span * 0.05;

    let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let x_of = |q: usize| MARGIN_LEFT + plot_w * q as f64 / (QUANTILE_COUNT - 1) as f64;
    let y_of = |g: f64| MARGIN_TOP + plot_h * (1.0 - (g - y_lo) / (y_hi - y_lo));

    let mut svg = String::new();
    writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}">"#
    )?;
    writeln!(
        svg,
        r#"<rect width="{WIDTH}" height="{HEIGHT}" fill="white"/>"#
    )?;
    writeln!(
        svg,
        r#"<text x="{}" y="20" font-family="sans-serif" font-size="14">Relative income growth by global quantile, {}-{} (sample {})</text>"#,
        MARGIN_LEFT, report.base_year, report.comparison_year, report.sample
    )?;

    // axes
    writeln!(
        svg,
        r#"<line x1="{l}" y1="{t}" x2="{l}" y2="{b}" stroke="black"/>"#,
        l = MARGIN_LEFT,
        t = MARGIN_TOP,
        b = MARGIN_TOP + plot_h
    )?;
    writeln!(
        svg,
        r#"<line x1="{l}" y1="{b}" x2="{r}" y2="{b}" stroke="black"/>"#,
        l = MARGIN_LEFT,
        r = MARGIN_LEFT + plot_w,
        b = MARGIN_TOP + plot_h
    )?;

    // zero line, when the range crosses it
    if y_lo < 0.0 && y_hi > 0.0 {
        let y0 = y_of(0.0);
        writeln!(
            svg,
            r##"<line x1="{l}" y1="{y0:.2}" x2="{r}" y2="{y0:.2}" stroke="#bbbbbb" stroke-dasharray="4 3"/>"##,
            l = MARGIN_LEFT,
            r = MARGIN_LEFT + plot_w
        )?;
    }

    // x ticks every fifth quantile, plus the last
    for q in [0usize, 5, 10, 15, 19] {
        let x = x_of(q);
        let b = MARGIN_TOP + plot_h;
        writeln!(
            svg,
            r#"<line x1="{x:.2}" y1="{b}" x2="{x:.2}" y2="{}" stroke="black"/>"#,
            b + 5.0
        )?;
        writeln!(
            svg,
            r#"<text x="{x:.2}" y="{}" font-family="sans-serif" font-size="11" text-anchor="middle">{q}</text>"#,
            b + 20.0
        )?;
    }

    // y labels at the padded extremes
    for g in [y_lo, y_hi] {
        let y = y_of(g);
        writeln!(
            svg,
            r#"<text x="{}" y="{y:.2}" font-family="sans-serif" font-size="11" text-anchor="end">{g:.3}</text>"#,
            MARGIN_LEFT - 8.0
        )?;
    }

    let points: Vec<String> = finite
        .iter()
        .map(|&(q, g)| format!("{:.2},{:.2}", x_of(q), y_of(g)))
        .collect();
    writeln!(
        svg,
        r##"<polyline points="{}" fill="none" stroke="#1f77b4" stroke-width="2"/>"##,
        points.join(" ")
    )?;

    writeln!(svg, "</svg>")?;
    Ok(svg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::types::{CurveReport, QuantilePoint};
    use chrono::Utc;
    use std::fs;

    fn report_with_growth(growth: Vec<f64>) -> CurveReport {
        let points = growth
            .into_iter()
            .enumerate()
            .map(|(quantile, g)| QuantilePoint {
                quantile,
                base_mean: 100.0,
                comparison_mean: 100.0 * (1.0 + g),
                growth: g,
            })
            .collect();
        CurveReport {
            schema_version: 1,
            generated_at: Utc::now(),
            base_year: 1988,
            comparison_year: 2008,
            sample: 1,
            points,
        }
    }

    #[test]
    fn test_curve_svg_contains_polyline() {
        let growth: Vec<f64> = (0..QUANTILE_COUNT).map(|i| i as f64 * 0.05 - 0.2).collect();
        let svg = curve_svg(&report_with_growth(growth)).unwrap();

        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("polyline"));
        // range crosses zero, so the dashed zero line is drawn
        assert!(svg.contains("stroke-dasharray"));
    }

    #[test]
    fn test_curve_svg_skips_non_finite_points() {
        let mut growth = vec![0.5; QUANTILE_COUNT];
        growth[3] = f64::NAN;
        growth[4] = f64::INFINITY;
        let svg = curve_svg(&report_with_growth(growth)).unwrap();

        let polyline = svg.lines().find(|l| l.contains("polyline")).unwrap();
        let point_count = polyline.matches(',').count();
        assert_eq!(point_count, QUANTILE_COUNT - 2);
    }

    #[test]
    fn test_curve_svg_all_nan_fails() {
        let growth = vec![f64::NAN; QUANTILE_COUNT];
        assert!(curve_svg(&report_with_growth(growth)).is_err());
    }

    #[test]
    fn test_render_svg_writes_file() {
        let path = format!(
            "{}/elephant_curve_test_chart.svg",
            std::env::temp_dir().display()
        );
        let _ = fs::remove_file(&path);

        let growth = vec![0.2; QUANTILE_COUNT];
        render_svg(&report_with_growth(growth), &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("</svg>"));

        fs::remove_file(&path).unwrap();
    }
}
