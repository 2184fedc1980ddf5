//! Greedy nearest-neighbour assignment.

use geomatch_model::{
    Assignment, DegreeThreshold, GeoPoint, LateralRecord, MatchOutcome, MatchPolicy, RawRecord,
};

use crate::error::{AssignError, CoordinateSide, Result};

/// Engine matching lateral queries against a raw candidate pool.
///
/// Queries are processed strictly in input order. Each query scans every live
/// candidate and takes the one with the smallest
/// [`GeoPoint::degree_distance`]; ties go to the earliest candidate in pool
/// order. Under [`MatchPolicy::WithRemoval`] the winner permanently leaves
/// the pool, which makes the result a greedy, order-dependent one-to-one
/// assignment rather than a globally optimal one. That order dependence is
/// intentional: surveys are recorded in drive order, and crews expect the
/// first pass over a site to claim its photos.
///
/// Runtime is O(queries x candidates) with no spatial index, comfortably fast
/// for the hundreds-to-low-thousands of rows these tables carry.
pub struct AssignEngine {
    candidates: Vec<RawRecord>,
    policy: MatchPolicy,
    threshold: Option<DegreeThreshold>,
}

impl AssignEngine {
    /// Creates an engine owning its candidate pool for one run.
    pub fn new(candidates: Vec<RawRecord>, policy: MatchPolicy) -> Self {
        Self {
            candidates,
            policy,
            threshold: None,
        }
    }

    /// Sets the optional acceptance gate. A winning score above
    /// `threshold.max_score()` turns the query into
    /// [`MatchOutcome::OutsideThreshold`] without consuming the candidate.
    #[must_use]
    pub fn with_threshold(mut self, threshold: Option<DegreeThreshold>) -> Self {
        self.threshold = threshold;
        self
    }

    /// Size of the backing candidate pool.
    #[must_use]
    pub fn pool_size(&self) -> usize {
        self.candidates.len()
    }

    /// Matches every query against the pool, in query order.
    ///
    /// # Errors
    ///
    /// [`AssignError::ExhaustedPool`] when a with-removal run finds the pool
    /// empty, and [`AssignError::InvalidCoordinate`] when any input carries a
    /// NaN or infinite coordinate. Either way the whole run is discarded.
    pub fn assign(&self, queries: &[LateralRecord]) -> Result<AssignmentRun> {
        for query in queries {
            if !query.point.is_finite() {
                return Err(AssignError::InvalidCoordinate {
                    side: CoordinateSide::Query,
                    row: query.row,
                });
            }
        }
        for candidate in &self.candidates {
            if !candidate.point.is_finite() {
                return Err(AssignError::InvalidCoordinate {
                    side: CoordinateSide::Candidate,
                    row: candidate.row,
                });
            }
        }

        // Removal is a live-index list over the immutable backing pool.
        // Iteration stays in pool input order across removals, which is what
        // keeps the first-minimum tie-break stable.
        let mut live: Vec<usize> = (0..self.candidates.len()).collect();
        let mut assignments = Vec::with_capacity(queries.len());

        for query in queries {
            let outcome = match self.nearest_live(&query.point, &live) {
                Some(nearest) => {
                    let candidate = &self.candidates[nearest.index];
                    if let Some(threshold) = self.threshold
                        && !threshold.accepts(nearest.score)
                    {
                        MatchOutcome::OutsideThreshold {
                            nearest: candidate.filename.clone(),
                            score: nearest.score,
                        }
                    } else {
                        if self.policy == MatchPolicy::WithRemoval {
                            live.remove(nearest.slot);
                        }
                        MatchOutcome::Matched {
                            filename: candidate.filename.clone(),
                            score: nearest.score,
                        }
                    }
                }
                None => match self.policy {
                    MatchPolicy::WithRemoval => {
                        return Err(AssignError::ExhaustedPool {
                            query_row: query.row,
                            pool_size: self.candidates.len(),
                        });
                    }
                    MatchPolicy::WithoutRemoval => MatchOutcome::NoCandidates,
                },
            };
            assignments.push(Assignment::new(query.row, outcome));
        }

        Ok(AssignmentRun { assignments })
    }

    /// Scans the live pool for the nearest candidate to `point`. Returns
    /// `None` only when the live pool is empty.
    fn nearest_live(&self, point: &GeoPoint, live: &[usize]) -> Option<Nearest> {
        let mut best: Option<Nearest> = None;
        for (slot, &index) in live.iter().enumerate() {
            let score = point.degree_distance(&self.candidates[index].point);
            // Strict improvement only, so the first minimal candidate wins
            // ties.
            match &best {
                Some(current) if score >= current.score => {}
                _ => best = Some(Nearest { slot, index, score }),
            }
        }
        best
    }
}

/// Winning candidate of one pool scan.
struct Nearest {
    /// Position in the live-index list (for removal).
    slot: usize,
    /// Index into the backing pool.
    index: usize,
    score: f64,
}

/// Result of a completed run: one entry per query, in query order.
#[derive(Debug, Clone)]
pub struct AssignmentRun {
    pub assignments: Vec<Assignment>,
}

impl AssignmentRun {
    #[must_use]
    pub fn matched_count(&self) -> usize {
        self.assignments
            .iter()
            .filter(|a| a.outcome.is_matched())
            .count()
    }

    #[must_use]
    pub fn no_candidates_count(&self) -> usize {
        self.assignments
            .iter()
            .filter(|a| matches!(a.outcome, MatchOutcome::NoCandidates))
            .count()
    }

    #[must_use]
    pub fn outside_threshold_count(&self) -> usize {
        self.assignments
            .iter()
            .filter(|a| matches!(a.outcome, MatchOutcome::OutsideThreshold { .. }))
            .count()
    }

    /// Queries that did not produce a usable filename.
    #[must_use]
    pub fn unmatched_count(&self) -> usize {
        self.assignments.len() - self.matched_count()
    }

    /// Largest distance score across scored outcomes.
    #[must_use]
    pub fn max_score(&self) -> Option<f64> {
        self.assignments
            .iter()
            .filter_map(|a| a.outcome.score())
            .fold(None, |acc, score| match acc {
                Some(max) if max >= score => Some(max),
                _ => Some(score),
            })
    }

    /// Mean distance score across scored outcomes.
    #[must_use]
    pub fn mean_score(&self) -> Option<f64> {
        let scores: Vec<f64> = self
            .assignments
            .iter()
            .filter_map(|a| a.outcome.score())
            .collect();
        if scores.is_empty() {
            return None;
        }
        Some(scores.iter().sum::<f64>() / scores.len() as f64)
    }
}
