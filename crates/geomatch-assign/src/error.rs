//! Error types for assignment runs.

use std::fmt;

use thiserror::Error;

/// Which side of the match carried the offending value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateSide {
    Query,
    Candidate,
}

impl fmt::Display for CoordinateSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordinateSide::Query => f.write_str("query"),
            CoordinateSide::Candidate => f.write_str("candidate"),
        }
    }
}

/// Errors that abort a matching run. No partial results are produced.
#[derive(Debug, Error)]
pub enum AssignError {
    /// A with-removal run met an empty pool: more queries than candidates.
    /// Raised at the first starved query, so `query_row` equals the original
    /// pool size when the run started with a full table.
    #[error(
        "candidate pool exhausted at lateral row {query_row} (pool of {pool_size}); \
         more queries than candidates under with-removal"
    )]
    ExhaustedPool { query_row: usize, pool_size: usize },

    /// A non-finite coordinate reached the engine. Loaders reject these at
    /// load time; this guard keeps NaN out of the distance comparisons no
    /// matter how the records were built.
    #[error("non-finite coordinate on {side} row {row}")]
    InvalidCoordinate { side: CoordinateSide, row: usize },
}

/// Convenience alias for assignment results.
pub type Result<T> = std::result::Result<T, AssignError>;
