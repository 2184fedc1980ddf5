//! Matched-table output.

use std::fs::File;
use std::path::Path;

use polars::prelude::*;

use geomatch_model::{Assignment, columns};

use crate::error::{IngestError, Result};

/// Appends the matched-filename column to the lateral frame and writes the
/// result as CSV.
///
/// Row order and the original columns pass through untouched; unmatched
/// queries get an empty cell. `assignments` must cover every row in query
/// order, which is what the engine produces for a full-table run. A
/// pre-existing column with the same name is replaced, so re-running over an
/// earlier output is safe.
///
/// # Errors
///
/// [`IngestError::TableWrite`] when the assignment count does not line up
/// with the frame or the file cannot be produced.
pub fn write_matched_table(df: &DataFrame, assignments: &[Assignment], path: &Path) -> Result<()> {
    if assignments.len() != df.height() {
        return Err(IngestError::TableWrite {
            path: path.to_path_buf(),
            message: format!(
                "{} assignments for {} rows",
                assignments.len(),
                df.height()
            ),
        });
    }

    let values: Vec<String> = assignments
        .iter()
        .map(|a| a.outcome.filename().unwrap_or("").to_string())
        .collect();
    let matched = Series::new(columns::MATCHED_FILENAME.into(), values);

    let mut out = df.clone();
    out.with_column(matched).map_err(|e| IngestError::TableWrite {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut file = File::create(path).map_err(|e| IngestError::TableWrite {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut out)
        .map_err(|e| IngestError::TableWrite {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    tracing::info!(path = %path.display(), rows = out.height(), "matched table written");
    Ok(())
}
