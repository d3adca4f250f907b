//! CSV loader for the LM-WPID survey table.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::pipeline::types::SurveyRecord;

/// The survey years present in the LM-WPID panel.
pub const SURVEY_YEARS: [u16; 5] = [1988, 1993, 1998, 2003, 2008];

/// Reads the survey CSV into memory, one [`SurveyRecord`] per row.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or any row is missing a
/// required field or fails to parse; the run aborts on the first bad row.
pub fn load_survey(path: &Path) -> Result<Vec<SurveyRecord>> {
    let mut rdr = csv::Reader::from_path(path)
        .with_context(|| format!("opening survey file {}", path.display()))?;

    let mut records = Vec::new();
    for (i, result) in rdr.deserialize().enumerate() {
        let record: SurveyRecord =
            result.with_context(|| format!("malformed survey row {}", i + 1))?;
        records.push(record);
    }

    debug!(rows = records.len(), path = %path.display(), "survey loaded");
    Ok(records)
}
