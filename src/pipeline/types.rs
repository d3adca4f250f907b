//! Data types used by the quantile pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of global population quantiles the cumulative axis is cut into.
pub const QUANTILE_COUNT: usize = 20;

/// A single row deserialized from the LM-WPID survey CSV.
///
/// One row describes one income decile group of one country (or one
/// rural/urban subset of a country when `sample` is 1) in one survey year.
/// Columns not listed here are ignored during deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct SurveyRecord {
    /// Survey year the measurement belongs to (1988, 1993, 1998, 2003, 2008).
    #[serde(rename = "bin_year")]
    pub year: u16,

    /// 0 = countries reported whole, 1 = China/India/Indonesia split into
    /// rural and urban subsets. Never mix the two in one analysis.
    #[serde(rename = "mysample")]
    pub sample: u8,

    /// Three-letter country code, with an -R/-U suffix for split countries.
    #[serde(rename = "contcod")]
    pub country_code: String,

    /// Mean annual income of the decile group, in 2005 PPP dollars.
    #[serde(rename = "RRinc")]
    pub income: f64,

    /// Population of the decile group, in millions.
    #[serde(rename = "pop")]
    pub population: f64,

    /// Total country population in millions. Present in the source schema,
    /// unused by the pipeline.
    #[serde(rename = "totpop")]
    pub total_population: Option<f64>,
}

/// A survey row after filtering to one (year, sample) selection and
/// projecting to the two fields the pipeline needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilteredRow {
    pub population: f64,
    pub income: f64,
}

/// A filtered row in ascending-income order, carrying the running total of
/// population up to and including itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CumulativeRow {
    pub population: f64,
    pub income: f64,
    pub running_population: f64,
}

/// Mean income per population quantile for one (year, sample) selection.
///
/// `means` always has exactly [`QUANTILE_COUNT`] entries, in bucket order.
/// A bucket that received no rows holds NaN.
#[derive(Debug, Clone, Serialize)]
pub struct QuantileSummary {
    pub year: u16,
    pub sample: u8,
    pub means: Vec<f64>,
}

/// Relative income growth per quantile between two survey years.
///
/// `growth[i] = (late[i] - early[i]) / early[i]`. A zero early mean yields
/// an infinite value; NaN means yield NaN. Neither is masked.
#[derive(Debug, Clone, Serialize)]
pub struct ElephantCurve {
    pub growth: Vec<f64>,
}

/// One row of the final report: both means and the growth ratio for a bucket.
#[derive(Debug, Clone, Serialize)]
pub struct QuantilePoint {
    pub quantile: usize,
    pub base_mean: f64,
    pub comparison_mean: f64,
    pub growth: f64,
}

/// Complete result of one pipeline run, serialized as JSON and CSV.
#[derive(Debug, Clone, Serialize)]
pub struct CurveReport {
    pub schema_version: u8,
    pub generated_at: DateTime<Utc>,
    pub base_year: u16,
    pub comparison_year: u16,
    pub sample: u8,
    pub points: Vec<QuantilePoint>,
}
