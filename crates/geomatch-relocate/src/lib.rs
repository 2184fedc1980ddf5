//! Relocation of matched survey images.
//!
//! Given the filenames from a matched table, this crate finds each one under
//! a source tree and copies it into a destination folder without ever
//! overwriting: name collisions get the Explorer-style ` - Copy` /
//! ` - Copy N` suffix. The source tree is walked once into a [`FileIndex`]
//! and every lookup hits that index.
//!
//! Missing files and empty (unmatched) cells are tallied in the
//! [`CopyReport`] rather than treated as errors; filesystem failures are.

mod copier;
mod error;
mod index;

pub use copier::{CopiedFile, CopyReport, collision_free_path, copy_matched};
pub use error::{RelocateError, Result};
pub use index::FileIndex;
