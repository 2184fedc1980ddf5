//! Error types for file relocation.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a collection run. A filename that simply is not in the
/// source tree is not one of these; missing files are recorded per name in
/// the copy report and the run continues.
#[derive(Debug, Error)]
pub enum RelocateError {
    /// Source folder missing or not a directory.
    #[error("source folder not found: {path}")]
    SourceNotFound { path: PathBuf },

    /// Recursive walk over the source tree failed.
    #[error("failed to walk source tree {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// Destination folder could not be created.
    #[error("failed to create destination folder {path}: {source}")]
    CreateDestination {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An individual copy failed after the source file was found.
    #[error("failed to copy {from} to {to}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience alias for relocation results.
pub type Result<T> = std::result::Result<T, RelocateError>;
