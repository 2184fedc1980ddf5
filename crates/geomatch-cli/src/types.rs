use std::path::PathBuf;

use geomatch_model::{DegreeThreshold, MatchPolicy};
use geomatch_relocate::CopyReport;

#[derive(Debug)]
pub struct MatchResult {
    pub lateral_file: PathBuf,
    pub raw_file: PathBuf,
    pub output_file: PathBuf,
    pub policy: MatchPolicy,
    pub threshold: Option<DegreeThreshold>,
    pub queries: usize,
    pub pool: usize,
    pub matched: usize,
    pub no_candidates: usize,
    pub outside_threshold: usize,
    pub max_score: Option<f64>,
    pub mean_score: Option<f64>,
    pub report_json: Option<PathBuf>,
}

impl MatchResult {
    /// Candidates still unconsumed after the run.
    pub fn pool_remaining(&self) -> usize {
        match self.policy {
            MatchPolicy::WithRemoval => self.pool - self.matched,
            MatchPolicy::WithoutRemoval => self.pool,
        }
    }
}

#[derive(Debug)]
pub struct CollectResult {
    pub csv_file: PathBuf,
    pub source_folder: PathBuf,
    pub destination_folder: PathBuf,
    pub report: CopyReport,
}
