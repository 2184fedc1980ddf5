//! Error types for table ingestion and output.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, validating, or writing the tables.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Directory not found or not a directory.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file bytes.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Table Errors ===
    /// Undecodable or unparseable table data.
    #[error("failed to load table {path}: {message}")]
    DataLoad { path: PathBuf, message: String },

    /// Table parsed but has no data rows.
    #[error("table has no data rows: {path}")]
    EmptyTable { path: PathBuf },

    /// Required column not present under its exact physical name.
    #[error("required column '{column}' not found in {path}")]
    MissingColumn { column: String, path: PathBuf },

    /// A coordinate cell failed finite-number validation. `row` is the
    /// zero-based data row, header excluded.
    #[error("invalid coordinate in {path}: column '{column}' row {row} has value '{value}'")]
    InvalidCoordinate {
        column: String,
        row: usize,
        value: String,
        path: PathBuf,
    },

    /// A raw-table row has no usable filename.
    #[error("missing filename in {path}: row {row}")]
    MissingFilename { row: usize, path: PathBuf },

    // === Output Errors ===
    /// Failed to serialize or write the output table.
    #[error("failed to write table {path}: {message}")]
    TableWrite { path: PathBuf, message: String },
}

/// Convenience alias for ingestion results.
pub type Result<T> = std::result::Result<T, IngestError>;
