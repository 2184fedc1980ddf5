//! Source-tree filename index.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{RelocateError, Result};

/// Maps file names to their first location under a source root.
///
/// Built from one recursive walk with siblings visited in file-name order,
/// so "first match wins" is deterministic across runs and platforms. A
/// duplicate name deeper in the tree loses to the earliest hit in walk
/// order. One walk up front beats re-walking the tree for every lookup when
/// a matched table carries hundreds of names.
#[derive(Debug)]
pub struct FileIndex {
    by_name: BTreeMap<String, PathBuf>,
}

impl FileIndex {
    /// Walks `source_root` recursively and indexes every regular file.
    ///
    /// # Errors
    ///
    /// [`RelocateError::SourceNotFound`] when the root is missing,
    /// [`RelocateError::Walk`] when any directory cannot be read.
    pub fn build(source_root: &Path) -> Result<Self> {
        if !source_root.is_dir() {
            return Err(RelocateError::SourceNotFound {
                path: source_root.to_path_buf(),
            });
        }

        let mut by_name = BTreeMap::new();
        for entry in WalkDir::new(source_root).sort_by_file_name() {
            let entry = entry.map_err(|e| RelocateError::Walk {
                path: source_root.to_path_buf(),
                source: e,
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            // Non-UTF-8 names can never equal a CSV cell, skip them.
            let Some(name) = entry.file_name().to_str() else {
                continue;
            };
            by_name
                .entry(name.to_string())
                .or_insert_with(|| entry.into_path());
        }

        tracing::debug!(
            root = %source_root.display(),
            files = by_name.len(),
            "source tree indexed"
        );
        Ok(Self { by_name })
    }

    /// Location of the first-indexed file with this exact name.
    #[must_use]
    pub fn find(&self, filename: &str) -> Option<&Path> {
        self.by_name.get(filename).map(PathBuf::as_path)
    }

    /// Number of distinct file names indexed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
