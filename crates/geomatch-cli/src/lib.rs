//! CLI library components for the geomatch toolkit.

pub mod logging;
pub mod pipeline;
pub mod prompt;
pub mod report;
