//! Table ingestion for the geomatch toolkit.
//!
//! This crate turns survey CSV files into Polars DataFrames and typed
//! records, and writes the matched table back out. All text goes through an
//! encoding fallback (UTF-8 first, Windows-1252 second) before parsing, and
//! coordinates are validated to be finite at load time so the matcher never
//! sees NaN.
//!
//! # Features
//!
//! - **CSV loading**: decode-then-parse into DataFrames, header required
//! - **Record extraction**: typed query and candidate records with row
//!   context on every validation error
//! - **Discovery**: non-recursive CSV listing for interactive menus
//! - **Output**: append the matched-filename column and write CSV, or read
//!   that column back for the collection step
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use geomatch_ingest::{lateral_records, raw_records, read_table};
//!
//! let lateral = read_table(Path::new("lateral.csv"))?;
//! let raw = read_table(Path::new("raw.csv"))?;
//!
//! let queries = lateral_records(&lateral, Path::new("lateral.csv"))?;
//! let candidates = raw_records(&raw, Path::new("raw.csv"))?;
//! ```

mod decode;
mod discovery;
mod error;
mod matched;
mod polars_utils;
mod reader;
mod records;
mod writer;

// === Error Types ===
pub use error::{IngestError, Result};

// === Decoding ===
pub use decode::{decode_bytes, read_decoded};

// === CSV Reading ===
pub use reader::read_table;

// === Record Extraction ===
pub use records::{lateral_records, raw_records};

// === File Discovery ===
pub use discovery::list_csv_files;

// === Output ===
pub use matched::matched_filenames;
pub use writer::write_matched_table;

// === AnyValue Helpers ===
pub use polars_utils::{any_to_f64, any_to_string, format_numeric, parse_f64};
