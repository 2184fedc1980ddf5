//! Shared data model for the geomatch toolkit.
//!
//! This crate defines the record types exchanged between ingestion, the
//! assignment engine, and the output writer: coordinates, query and candidate
//! records, match policies, and per-query outcomes. It also pins down the
//! column-name contract of the survey CSV files, including the physically
//! quirky raw filename header.

pub mod columns;
pub mod outcome;
pub mod policy;
pub mod record;

pub use outcome::{Assignment, MatchOutcome};
pub use policy::{DegreeThreshold, MatchPolicy};
pub use record::{GeoPoint, LateralRecord, RawRecord};
