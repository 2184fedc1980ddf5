//! Per-query match outcomes.

use serde::{Deserialize, Serialize};

/// What matching produced for a single query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchOutcome {
    /// The nearest live candidate was accepted.
    Matched { filename: String, score: f64 },
    /// The pool was empty when the query was processed. Only reachable under
    /// the without-removal policy; with-removal treats an empty pool as pool
    /// exhaustion and aborts the run instead.
    NoCandidates,
    /// The nearest candidate sat outside the acceptance gate. The candidate
    /// stays in the pool.
    OutsideThreshold { nearest: String, score: f64 },
}

impl MatchOutcome {
    /// Matched filename, if the query matched.
    #[must_use]
    pub fn filename(&self) -> Option<&str> {
        match self {
            MatchOutcome::Matched { filename, .. } => Some(filename),
            _ => None,
        }
    }

    /// Distance score of the nearest candidate, if one existed.
    #[must_use]
    pub fn score(&self) -> Option<f64> {
        match self {
            MatchOutcome::Matched { score, .. }
            | MatchOutcome::OutsideThreshold { score, .. } => Some(*score),
            MatchOutcome::NoCandidates => None,
        }
    }

    #[must_use]
    pub fn is_matched(&self) -> bool {
        matches!(self, MatchOutcome::Matched { .. })
    }
}

/// One query's result, tagged with the lateral row it belongs to.
///
/// Assignments are produced in query order, so `query_row` values come out
/// strictly increasing for a full-table run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// Zero-based data-row index of the lateral query.
    pub query_row: usize,
    pub outcome: MatchOutcome,
}

impl Assignment {
    pub fn new(query_row: usize, outcome: MatchOutcome) -> Self {
        Self { query_row, outcome }
    }
}
