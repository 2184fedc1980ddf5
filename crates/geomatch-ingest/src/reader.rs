//! CSV loading into Polars DataFrames.

use std::io::Cursor;
use std::path::Path;

use polars::prelude::*;

use crate::decode::read_decoded;
use crate::error::{IngestError, Result};

/// Rows sampled for dtype inference.
const INFER_SCHEMA_ROWS: usize = 100;

/// Reads a CSV file into a DataFrame.
///
/// The bytes are decoded first (UTF-8 with Windows-1252 fallback, see
/// [`crate::decode`]) and parsed from memory, so Polars always sees valid
/// UTF-8. The header row is required. Header cells keep their physical
/// spelling apart from surrounding-whitespace trimming; in particular the
/// raw filename header keeps its `!` and quotes.
///
/// # Errors
///
/// [`IngestError::DataLoad`] when parsing fails,
/// [`IngestError::EmptyTable`] when the file holds a header but no rows,
/// plus the decode-layer errors.
pub fn read_table(path: &Path) -> Result<DataFrame> {
    let text = read_decoded(path)?;
    let cursor = Cursor::new(text.into_bytes());

    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .into_reader_with_file_handle(cursor)
        .finish()
        .map_err(|e| IngestError::DataLoad {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    if df.height() == 0 {
        return Err(IngestError::EmptyTable {
            path: path.to_path_buf(),
        });
    }

    trim_headers(&mut df, path)?;
    tracing::debug!(
        path = %path.display(),
        rows = df.height(),
        cols = df.width(),
        "table loaded"
    );
    Ok(df)
}

/// Strips surrounding whitespace from header names. Exports padded by hand
/// editing show up often enough that exact-name lookups need this.
fn trim_headers(df: &mut DataFrame, path: &Path) -> Result<()> {
    let renames: Vec<(String, String)> = df
        .get_column_names()
        .iter()
        .filter_map(|name| {
            let original = name.as_str();
            let trimmed = original.trim();
            if trimmed == original {
                None
            } else {
                Some((original.to_string(), trimmed.to_string()))
            }
        })
        .collect();

    for (from, to) in renames {
        df.rename(&from, to.into())
            .map_err(|e| IngestError::DataLoad {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
    }
    Ok(())
}
