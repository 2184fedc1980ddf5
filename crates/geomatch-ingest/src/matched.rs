//! Matched-filename extraction from a previously written output table.

use std::path::Path;

use geomatch_model::columns;

use crate::decode::read_decoded;
use crate::error::{IngestError, Result};

/// Reads the matched-filename column as trimmed strings, one per data row.
///
/// This goes through the `csv` crate rather than a DataFrame load on
/// purpose: dtype inference would turn a numeric-looking filename like
/// `1207` into a number and reformat it, and a single string column does not
/// need a frame. Empty cells (unmatched rows) are kept so the caller can
/// count what it skips.
///
/// # Errors
///
/// [`IngestError::MissingColumn`] when the matched column is absent, or
/// [`IngestError::DataLoad`] for malformed CSV, plus the decode-layer
/// errors.
pub fn matched_filenames(path: &Path) -> Result<Vec<String>> {
    let text = read_decoded(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| IngestError::DataLoad {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .clone();
    let index = headers
        .iter()
        .position(|h| h.trim() == columns::MATCHED_FILENAME)
        .ok_or_else(|| IngestError::MissingColumn {
            column: columns::MATCHED_FILENAME.to_string(),
            path: path.to_path_buf(),
        })?;

    let mut filenames = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| IngestError::DataLoad {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        filenames.push(record.get(index).unwrap_or("").trim().to_string());
    }
    Ok(filenames)
}
