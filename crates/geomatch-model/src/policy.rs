//! Match policy and acceptance threshold.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Candidate-pool consumption policy for a matching run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchPolicy {
    /// One-to-one assignment: a matched candidate permanently leaves the
    /// pool, so earlier queries get first pick of close candidates.
    #[default]
    WithRemoval,
    /// One-to-many matching: the pool is never consumed and a candidate may
    /// win any number of queries.
    WithoutRemoval,
}

impl MatchPolicy {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchPolicy::WithRemoval => "with-removal",
            MatchPolicy::WithoutRemoval => "without-removal",
        }
    }
}

impl fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Acceptance gate for matches, in coordinate degrees.
///
/// The gate applies to the combined L1 score: a winning candidate whose
/// distance exceeds `lat + lon` is reported as out of range instead of being
/// handed to the query as a nearest-but-too-far match.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DegreeThreshold {
    pub lat: f64,
    pub lon: f64,
}

impl DegreeThreshold {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Largest distance score the gate lets through.
    #[must_use]
    pub fn max_score(&self) -> f64 {
        self.lat + self.lon
    }

    /// True when `score` is within the gate.
    #[must_use]
    pub fn accepts(&self, score: f64) -> bool {
        score <= self.max_score()
    }
}
