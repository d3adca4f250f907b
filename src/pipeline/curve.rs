//! Elephant curve construction: combines two aligned quantile summaries
//! into per-quantile relative income growth.

use anyhow::{Result, bail};
use chrono::Utc;

use crate::pipeline::types::{
    CurveReport, ElephantCurve, QUANTILE_COUNT, QuantilePoint, QuantileSummary,
};

/// Computes per-quantile relative growth between an early and a late summary.
///
/// `growth[i] = (late[i] - early[i]) / early[i]`. A zero early mean produces
/// an infinite ratio and NaN means produce NaN; both are left as-is.
///
/// # Errors
///
/// Returns an error if either summary does not have exactly
/// [`QUANTILE_COUNT`] entries.
pub fn build(early: &QuantileSummary, late: &QuantileSummary) -> Result<ElephantCurve> {
    if early.means.len() != QUANTILE_COUNT || late.means.len() != QUANTILE_COUNT {
        bail!(
            "quantile summaries are misaligned: {} vs {} entries (expected {})",
            early.means.len(),
            late.means.len(),
            QUANTILE_COUNT
        );
    }

    let growth = early
        .means
        .iter()
        .zip(&late.means)
        .map(|(e, l)| (l - e) / e)
        .collect();

    Ok(ElephantCurve { growth })
}

/// Assembles the serializable report joining both summaries and the curve.
pub fn report(
    early: &QuantileSummary,
    late: &QuantileSummary,
    curve: &ElephantCurve,
) -> CurveReport {
    let points = curve
        .growth
        .iter()
        .enumerate()
        .map(|(quantile, &growth)| QuantilePoint {
            quantile,
            base_mean: early.means[quantile],
            comparison_mean: late.means[quantile],
            growth,
        })
        .collect();

    CurveReport {
        schema_version: 1,
        generated_at: Utc::now(),
        base_year: early.year,
        comparison_year: late.year,
        sample: early.sample,
        points,
    }
}
