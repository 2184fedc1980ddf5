//! Match and collect pipelines with explicit stages.
//!
//! The match pipeline runs in order:
//! 1. **Load**: read both tables, extract validated records
//! 2. **Assign**: run the nearest-neighbour engine
//! 3. **Write**: append the matched column and write the output table
//!
//! Collection reuses the load machinery for the matched column only; the
//! walking and copying live in `geomatch-relocate` and are driven from the
//! command layer so it can hang a progress bar on them.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use polars::prelude::DataFrame;
use tracing::info;

use geomatch_assign::{AssignEngine, AssignmentRun};
use geomatch_ingest::{lateral_records, raw_records, read_table, write_matched_table};
use geomatch_model::{DegreeThreshold, LateralRecord, MatchPolicy, RawRecord};

/// File name used when the output flag points at a directory.
pub const DEFAULT_OUTPUT_NAME: &str = "matched_output.csv";

/// Resolves the output flag: an existing directory gets
/// [`DEFAULT_OUTPUT_NAME`] joined onto it, anything else is taken as the
/// output file itself. The historical workflow passed a folder here, so both
/// spellings must keep working.
#[must_use]
pub fn resolve_output_path(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join(DEFAULT_OUTPUT_NAME)
    } else {
        path.to_path_buf()
    }
}

/// Result of the load stage.
#[derive(Debug)]
pub struct LoadedTables {
    /// The lateral frame, kept for pass-through output.
    pub lateral: DataFrame,
    pub queries: Vec<LateralRecord>,
    pub candidates: Vec<RawRecord>,
}

/// Reads and validates both input tables.
///
/// # Errors
///
/// Missing files fail here with the offending path; parse and validation
/// problems carry the ingest layer's row context.
pub fn load_tables(lateral_file: &Path, raw_file: &Path) -> Result<LoadedTables> {
    if !lateral_file.is_file() {
        bail!("lateral file does not exist: {}", lateral_file.display());
    }
    if !raw_file.is_file() {
        bail!("raw file does not exist: {}", raw_file.display());
    }

    let lateral = read_table(lateral_file).context("read lateral table")?;
    let raw = read_table(raw_file).context("read raw table")?;

    let queries = lateral_records(&lateral, lateral_file).context("extract lateral records")?;
    let candidates = raw_records(&raw, raw_file).context("extract raw records")?;

    info!(
        queries = queries.len(),
        candidates = candidates.len(),
        "tables loaded"
    );
    Ok(LoadedTables {
        lateral,
        queries,
        candidates,
    })
}

/// Runs the assignment engine over loaded records.
///
/// # Errors
///
/// Pool exhaustion and coordinate errors from the engine, annotated for the
/// operator.
pub fn assign_records(
    queries: &[LateralRecord],
    candidates: Vec<RawRecord>,
    policy: MatchPolicy,
    threshold: Option<DegreeThreshold>,
) -> Result<AssignmentRun> {
    let engine = AssignEngine::new(candidates, policy).with_threshold(threshold);
    let run = engine.assign(queries).context("match records")?;
    info!(
        matched = run.matched_count(),
        unmatched = run.unmatched_count(),
        "assignment finished"
    );
    Ok(run)
}

/// Writes the matched table next to the untouched lateral columns.
///
/// # Errors
///
/// Output I/O failures, annotated with the output path.
pub fn write_output(lateral: &DataFrame, run: &AssignmentRun, output_path: &Path) -> Result<()> {
    write_matched_table(lateral, &run.assignments, output_path)
        .with_context(|| format!("write matched table {}", output_path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_passes_files_through() {
        let path = Path::new("/tmp/some/matched.csv");
        assert_eq!(resolve_output_path(path), path);
    }

    #[test]
    fn test_output_path_joins_default_name_onto_directories() {
        let dir = tempfile::tempdir().unwrap();
        let resolved = resolve_output_path(dir.path());
        assert_eq!(resolved, dir.path().join("matched_output.csv"));
    }
}
