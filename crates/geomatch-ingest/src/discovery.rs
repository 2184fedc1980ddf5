//! CSV file discovery for interactive selection.

use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};

/// Lists the CSV files directly inside `dir`, without recursing.
///
/// Extension matching is case-insensitive and results come back sorted by
/// file name, so the numbered menus built on top of this stay stable between
/// runs.
///
/// # Errors
///
/// [`IngestError::DirectoryNotFound`] when `dir` is missing or not a
/// directory, [`IngestError::DirectoryRead`] when an entry cannot be read.
pub fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}
