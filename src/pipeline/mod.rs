//! Pipeline module - batch folder encryption and decryption.
//!
//! A batch is the non-recursive file listing of a folder, fixed at
//! call time. Files are processed in parallel and independently; the
//! call returns once every file in the batch has produced exactly one
//! success-or-failure outcome.

pub mod decrypt;
pub mod encrypt;

pub use decrypt::decrypt_folder;
pub use encrypt::encrypt_folder;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of one batch run over a folder.
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// Files transformed successfully
    pub processed: usize,
    /// Per-file failures with their error messages
    pub failed: Vec<(PathBuf, String)>,
}

impl BatchSummary {
    /// Total number of outcomes, successful or not.
    pub fn total(&self) -> usize {
        self.processed + self.failed.len()
    }
}

/// Non-recursive listing of the regular files in `dir`.
pub(crate) fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Cannot read folder: {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Cannot list folder: {}", dir.display()))?;
        if entry.file_type()?.is_file() {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}
