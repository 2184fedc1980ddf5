//! Record extraction with load-time coordinate validation.
//!
//! Non-finite coordinates are rejected here, with the file, column, row and
//! offending cell text in the error. The assignment engine re-checks
//! finiteness, but by then the row context is gone, so failing early gives
//! the better diagnostic.

use std::path::Path;

use polars::prelude::*;

use geomatch_model::{GeoPoint, LateralRecord, RawRecord, columns};

use crate::error::{IngestError, Result};
use crate::polars_utils::{any_to_f64, any_to_string};

/// Builds the ordered query list from a lateral table.
///
/// # Errors
///
/// [`IngestError::MissingColumn`] when a GPS column is absent,
/// [`IngestError::InvalidCoordinate`] on the first non-finite cell.
pub fn lateral_records(df: &DataFrame, path: &Path) -> Result<Vec<LateralRecord>> {
    let points = coordinate_column_pairs(df, path)?;
    Ok(points
        .into_iter()
        .enumerate()
        .map(|(row, point)| LateralRecord::new(row, point))
        .collect())
}

/// Builds the candidate pool from a raw table, including the filename under
/// its exact physical header ([`columns::RAW_FILENAME`]).
///
/// # Errors
///
/// Everything [`lateral_records`] reports, plus
/// [`IngestError::MissingFilename`] for blank filename cells.
pub fn raw_records(df: &DataFrame, path: &Path) -> Result<Vec<RawRecord>> {
    let points = coordinate_column_pairs(df, path)?;
    let filenames = required_column(df, columns::RAW_FILENAME, path)?;

    let mut records = Vec::with_capacity(points.len());
    for (row, point) in points.into_iter().enumerate() {
        let value = filenames.get(row).unwrap_or(AnyValue::Null);
        let filename = any_to_string(value);
        if filename.trim().is_empty() {
            return Err(IngestError::MissingFilename {
                row,
                path: path.to_path_buf(),
            });
        }
        records.push(RawRecord::new(row, point, filename));
    }
    Ok(records)
}

fn required_column<'a>(df: &'a DataFrame, column: &str, path: &Path) -> Result<&'a Column> {
    df.column(column).map_err(|_| IngestError::MissingColumn {
        column: column.to_string(),
        path: path.to_path_buf(),
    })
}

/// Reads both GPS columns into finite coordinate pairs, row by row.
fn coordinate_column_pairs(df: &DataFrame, path: &Path) -> Result<Vec<GeoPoint>> {
    let lat = required_column(df, columns::GPS_LATITUDE, path)?;
    let lon = required_column(df, columns::GPS_LONGITUDE, path)?;

    let mut points = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        let lat_value = finite_cell(lat, row, columns::GPS_LATITUDE, path)?;
        let lon_value = finite_cell(lon, row, columns::GPS_LONGITUDE, path)?;
        points.push(GeoPoint::new(lat_value, lon_value));
    }
    Ok(points)
}

fn finite_cell(column: &Column, row: usize, name: &str, path: &Path) -> Result<f64> {
    let value = column.get(row).unwrap_or(AnyValue::Null);
    match any_to_f64(value.clone()) {
        Some(parsed) if parsed.is_finite() => Ok(parsed),
        _ => Err(IngestError::InvalidCoordinate {
            column: name.to_string(),
            row,
            value: any_to_string(value),
            path: path.to_path_buf(),
        }),
    }
}
