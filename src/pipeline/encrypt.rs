//! Folder encryption - every file in the source folder becomes an
//! ASCII-armored `.gpg` file in the destination folder.

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use pgp::composed::{ArmorOptions, MessageBuilder, SignedPublicKey};
use pgp::crypto::sym::SymmetricKeyAlgorithm;
use rand::thread_rng;
use rayon::prelude::*;

use super::{list_files, BatchSummary};
use crate::crypto::keyring;

/// Encrypt every file in `src` to `dst` with the public key ring.
///
/// The batch is the file listing of `src` at call time. Each file is
/// encrypted independently; a failure is recorded in the summary and
/// does not block the other files. Source files are left untouched.
pub fn encrypt_folder(
    src: &Path,
    dst: &Path,
    public_ring: &Path,
    user_id: &str,
) -> Result<BatchSummary> {
    let key = keyring::load_public_ring(public_ring, user_id)?;

    let files = list_files(src)?;
    if files.is_empty() {
        tracing::info!("Nothing to encrypt in {}", src.display());
        return Ok(BatchSummary::default());
    }

    fs::create_dir_all(dst)
        .with_context(|| format!("Cannot create folder: {}", dst.display()))?;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("  [{bar:40.cyan/blue}] {pos}/{len} ({percent}%)")
            .unwrap()
            .progress_chars("█▓░"),
    );

    let processed = AtomicUsize::new(0);
    let errors = Mutex::new(Vec::new());

    files.par_iter().for_each(|path| {
        match encrypt_file(path, dst, &key) {
            Ok(()) => {
                processed.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                tracing::warn!("Failed to encrypt {}: {:#}", path.display(), e);
                errors.lock().unwrap().push((path.clone(), format!("{:#}", e)));
            }
        }
        pb.inc(1);
    });

    pb.finish();

    Ok(BatchSummary {
        processed: processed.into_inner(),
        failed: errors.into_inner().unwrap(),
    })
}

/// Output name: original filename plus a `.gpg` suffix.
fn encrypted_name(file_name: &str) -> String {
    format!("{}.gpg", file_name)
}

fn encrypt_file(path: &Path, dst: &Path, key: &SignedPublicKey) -> Result<()> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("Invalid file name: {}", path.display()))?;
    let out_path = dst.join(encrypted_name(file_name));

    let mut builder =
        MessageBuilder::from_file(path).seipd_v1(thread_rng(), SymmetricKeyAlgorithm::AES256);
    builder
        .encrypt_to_key(thread_rng(), key)
        .with_context(|| format!("Cannot wrap session key for {}", path.display()))?;

    // Encrypt fully in memory before touching the output path, so a
    // source that fails to open or read leaves no file behind.
    let armored = builder
        .to_armored_string(thread_rng(), ArmorOptions::default())
        .with_context(|| format!("Cannot encrypt {}", path.display()))?;
    fs::write(&out_path, armored)
        .with_context(|| format!("Cannot write ciphertext: {}", out_path.display()))?;

    Ok(())
}
