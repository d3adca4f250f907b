//! Quantile income aggregation: the filter → sort → cumulate → bucket →
//! group-mean pipeline that turns raw survey rows into a 20-entry
//! [`QuantileSummary`] for one (year, sample) selection.

use tracing::{debug, warn};

use crate::pipeline::types::{
    CumulativeRow, FilteredRow, QUANTILE_COUNT, QuantileSummary, SurveyRecord,
};
use crate::pipeline::utility::mean;

/// Selects the rows for one survey year and one sample flag, projected to
/// the (population, income) pair the rest of the pipeline works on.
///
/// The caller must use the same sample flag for the whole analysis; mixing
/// flag 0 and flag 1 rows double-counts the split countries.
pub fn filter_rows(records: &[SurveyRecord], year: u16, sample: u8) -> Vec<FilteredRow> {
    records
        .iter()
        .filter(|r| r.year == year && r.sample == sample)
        .map(|r| FilteredRow {
            population: r.population,
            income: r.income,
        })
        .collect()
}

/// Sorts rows by ascending income and attaches the running population total.
///
/// The order among rows with equal income is whatever the sort produces;
/// only cumulative population and bucket membership matter downstream.
pub fn cumulative(mut rows: Vec<FilteredRow>) -> Vec<CumulativeRow> {
    rows.sort_by(|a, b| a.income.total_cmp(&b.income));

    let mut running = 0.0;
    rows.into_iter()
        .map(|row| {
            running += row.population;
            CumulativeRow {
                population: row.population,
                income: row.income,
                running_population: running,
            }
        })
        .collect()
}

/// Maps a running-population value to its bucket in `0..QUANTILE_COUNT`.
///
/// The axis `[0, total_population]` is cut into equal-width intervals that
/// are right-inclusive, except the first which also contains 0. A value
/// exactly on a boundary therefore falls in the lower bucket.
pub fn bucket_of(running_population: f64, total_population: f64) -> usize {
    let width = total_population / QUANTILE_COUNT as f64;
    let idx = (running_population / width).ceil() as isize - 1;
    idx.clamp(0, QUANTILE_COUNT as isize - 1) as usize
}

/// Computes the mean income per population quantile for one (year, sample)
/// selection of the raw survey.
///
/// Buckets that receive no rows hold NaN so the summary always has exactly
/// [`QUANTILE_COUNT`] aligned entries. An empty selection yields an all-NaN
/// summary, propagated rather than defaulted.
pub fn summarize(records: &[SurveyRecord], year: u16, sample: u8) -> QuantileSummary {
    let rows = filter_rows(records, year, sample);
    if rows.is_empty() {
        warn!(year, sample, "selection matched no rows, summary is all NaN");
        return QuantileSummary {
            year,
            sample,
            means: vec![f64::NAN; QUANTILE_COUNT],
        };
    }

    let cumulated = cumulative(rows);
    let total_population = cumulated
        .last()
        .map(|r| r.running_population)
        .unwrap_or(0.0);

    let mut bucket_incomes: Vec<Vec<f64>> = vec![Vec::new(); QUANTILE_COUNT];
    for row in &cumulated {
        let bucket = bucket_of(row.running_population, total_population);
        bucket_incomes[bucket].push(row.income);
    }

    let means = bucket_incomes.iter().map(|incomes| mean(incomes)).collect();

    debug!(
        year,
        sample,
        rows = cumulated.len(),
        total_population,
        "quantile summary computed"
    );

    QuantileSummary {
        year,
        sample,
        means,
    }
}
