//! Greedy nearest-neighbour GPS assignment.
//!
//! This crate pairs each query row from a lateral survey table with the
//! closest candidate row from a raw event/image table, using the L1 distance
//! over raw coordinate degrees. Two pool policies are supported:
//!
//! - **with-removal**: one-to-one; a matched candidate leaves the pool.
//!   Running out of candidates mid-run is a hard error.
//! - **without-removal**: one-to-many; the pool is never consumed and an
//!   empty pool simply yields no-candidate outcomes.
//!
//! The engine is deliberately order-dependent and greedy. See
//! [`AssignEngine`] for the exact selection and tie-break rules.
//!
//! ```
//! use geomatch_assign::AssignEngine;
//! use geomatch_model::{GeoPoint, LateralRecord, MatchPolicy, RawRecord};
//!
//! let pool = vec![
//!     RawRecord::new(0, GeoPoint::new(52.0, 4.0), "a.jpg"),
//!     RawRecord::new(1, GeoPoint::new(53.0, 5.0), "b.jpg"),
//! ];
//! let queries = vec![LateralRecord::new(0, GeoPoint::new(52.9, 5.1))];
//!
//! let engine = AssignEngine::new(pool, MatchPolicy::WithRemoval);
//! let run = engine.assign(&queries)?;
//! assert_eq!(run.assignments[0].outcome.filename(), Some("b.jpg"));
//! # Ok::<(), geomatch_assign::AssignError>(())
//! ```

mod engine;
mod error;

pub use engine::{AssignEngine, AssignmentRun};
pub use error::{AssignError, CoordinateSide, Result};
