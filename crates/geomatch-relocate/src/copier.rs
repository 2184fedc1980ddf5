//! Collision-safe copying of matched files.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{RelocateError, Result};
use crate::index::FileIndex;

/// A file that made it into the destination folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopiedFile {
    /// Name as listed in the matched column.
    pub filename: String,
    /// Final name in the destination; differs from `filename` when a
    /// collision forced a rename.
    pub dest_name: String,
}

impl CopiedFile {
    /// True when the destination name picked up a collision suffix.
    #[must_use]
    pub fn renamed(&self) -> bool {
        self.filename != self.dest_name
    }
}

/// Outcome of one collection run.
#[derive(Debug, Default)]
pub struct CopyReport {
    pub copied: Vec<CopiedFile>,
    /// Names listed in the CSV but nowhere under the source root. Reported,
    /// never fatal.
    pub missing: Vec<String>,
    /// Empty cells skipped (unmatched rows in the matched table).
    pub skipped: usize,
}

impl CopyReport {
    #[must_use]
    pub fn copied_count(&self) -> usize {
        self.copied.len()
    }

    #[must_use]
    pub fn renamed_count(&self) -> usize {
        self.copied.iter().filter(|c| c.renamed()).count()
    }

    #[must_use]
    pub fn missing_count(&self) -> usize {
        self.missing.len()
    }
}

/// Picks a destination path for `filename` that no existing file occupies.
///
/// The collision chain is `photo.jpg`, `photo - Copy.jpg`,
/// `photo - Copy 2.jpg`, `photo - Copy 3.jpg` and so on. That is the naming
/// Windows Explorer uses, which the survey crews already know from sorting
/// these folders by hand.
#[must_use]
pub fn collision_free_path(dest_dir: &Path, filename: &str) -> PathBuf {
    let direct = dest_dir.join(filename);
    if !direct.exists() {
        return direct;
    }

    let (stem, extension) = split_name(filename);
    let mut candidate = dest_dir.join(format!("{stem} - Copy{extension}"));
    let mut counter = 1usize;
    while candidate.exists() {
        counter += 1;
        candidate = dest_dir.join(format!("{stem} - Copy {counter}{extension}"));
    }
    candidate
}

/// Splits `name.ext` into `("name", ".ext")`. Dotless names and leading-dot
/// names keep everything in the stem.
fn split_name(filename: &str) -> (&str, String) {
    match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, format!(".{ext}")),
        _ => (filename, String::new()),
    }
}

/// Copies every matched filename found under the source index into
/// `dest_dir`, creating the folder first when needed.
///
/// Empty names are counted as skipped, names absent from the index are
/// recorded as missing, and both leave the run going. `progress` fires once
/// per input name so callers can drive a progress bar.
///
/// # Errors
///
/// [`RelocateError::CreateDestination`] and [`RelocateError::Copy`]; an
/// individual copy failing is fatal since it points at a filesystem problem
/// rather than bad survey data.
pub fn copy_matched(
    filenames: &[String],
    index: &FileIndex,
    dest_dir: &Path,
    mut progress: impl FnMut(&str),
) -> Result<CopyReport> {
    if !dest_dir.is_dir() {
        fs::create_dir_all(dest_dir).map_err(|e| RelocateError::CreateDestination {
            path: dest_dir.to_path_buf(),
            source: e,
        })?;
    }

    let mut report = CopyReport::default();
    for raw_name in filenames {
        let name = raw_name.trim();
        progress(name);

        if name.is_empty() {
            report.skipped += 1;
            continue;
        }

        let Some(source) = index.find(name) else {
            tracing::warn!(filename = name, "file not found in source tree");
            report.missing.push(name.to_string());
            continue;
        };

        let dest = collision_free_path(dest_dir, name);
        fs::copy(source, &dest).map_err(|e| RelocateError::Copy {
            from: source.to_path_buf(),
            to: dest.clone(),
            source: e,
        })?;

        let dest_name = dest
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(name)
            .to_string();
        tracing::debug!(filename = name, dest = dest_name.as_str(), "copied");
        report.copied.push(CopiedFile {
            filename: name.to_string(),
            dest_name,
        });
    }

    tracing::info!(
        copied = report.copied_count(),
        missing = report.missing_count(),
        skipped = report.skipped,
        "collection finished"
    );
    Ok(report)
}
