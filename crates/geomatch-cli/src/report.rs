//! Machine-readable run report.
//!
//! Written next to the CSV output when `--report-json` is passed, so batch
//! callers can read the per-row outcomes without re-parsing the output table.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use geomatch_assign::AssignmentRun;
use geomatch_model::{Assignment, DegreeThreshold, MatchPolicy};

/// Full account of one match run.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub policy: MatchPolicy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_lat_diff: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_lon_diff: Option<f64>,
    pub lateral_file: PathBuf,
    pub raw_file: PathBuf,
    pub output_file: PathBuf,
    pub query_count: usize,
    pub candidate_count: usize,
    pub matched: usize,
    pub no_candidates: usize,
    pub outside_threshold: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_score: Option<f64>,
    /// Per-query outcomes, in query order.
    pub assignments: Vec<Assignment>,
}

impl RunReport {
    /// Builds the report from a finished run and its input shape.
    #[must_use]
    pub fn from_run(
        run: &AssignmentRun,
        policy: MatchPolicy,
        threshold: Option<DegreeThreshold>,
        lateral_file: &Path,
        raw_file: &Path,
        output_file: &Path,
        candidate_count: usize,
    ) -> Self {
        Self {
            policy,
            max_lat_diff: threshold.map(|t| t.lat),
            max_lon_diff: threshold.map(|t| t.lon),
            lateral_file: lateral_file.to_path_buf(),
            raw_file: raw_file.to_path_buf(),
            output_file: output_file.to_path_buf(),
            query_count: run.assignments.len(),
            candidate_count,
            matched: run.matched_count(),
            no_candidates: run.no_candidates_count(),
            outside_threshold: run.outside_threshold_count(),
            max_score: run.max_score(),
            mean_score: run.mean_score(),
            assignments: run.assignments.clone(),
        }
    }
}

/// Writes the report as pretty-printed JSON.
///
/// # Errors
///
/// Serialization or file write failures, annotated with the report path.
pub fn write_run_report(report: &RunReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("serialize run report")?;
    fs::write(path, json).with_context(|| format!("write run report {}", path.display()))?;
    Ok(())
}
