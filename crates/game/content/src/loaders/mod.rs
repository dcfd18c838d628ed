//! File loaders.
//!
//! Every loader reads through [`read_file`] so I/O failures carry the path.
//! Parsing policy differs per format: save files are lenient, data files
//! authored by hand (encounters, config) are strict.

pub mod config;
pub mod encounter;
pub mod snapshot;

pub use config::ConfigLoader;
pub use encounter::EncounterLoader;
pub use snapshot::{SnapshotLoader, SnapshotWriter};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
