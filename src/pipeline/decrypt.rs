//! Folder decryption - every file in the encrypted folder is unwrapped
//! with the secret key ring and restored as plaintext.

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use pgp::composed::{Message, SignedSecretKey};
use pgp::types::Password;
use rayon::prelude::*;

use super::{list_files, BatchSummary};
use crate::crypto::keyring;

/// Decrypt every file in `src` to `dst` with the secret key ring.
///
/// Mirrors [`super::encrypt_folder`]: fixed batch, independent files,
/// per-file failures recorded in the summary. The secret key stays
/// passphrase-protected on disk; the passphrase unlocks it per file.
pub fn decrypt_folder(
    src: &Path,
    dst: &Path,
    secret_ring: &Path,
    user_id: &str,
    passphrase: &str,
) -> Result<BatchSummary> {
    let key = keyring::load_secret_ring(secret_ring, user_id)?;
    let password = Password::from(passphrase);

    let files = list_files(src)?;
    if files.is_empty() {
        tracing::info!("Nothing to decrypt in {}", src.display());
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
        match decrypt_file(path, dst, &key, &password) {
            Ok(()) => {
                processed.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                tracing::warn!("Failed to decrypt {}: {:#}", path.display(), e);
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

/// Output name: everything from the first dot is stripped, then `.txt`
/// is appended (`invoice.pdf.gpg` becomes `invoice.txt`).
fn decrypted_name(file_name: &str) -> String {
    let stem = file_name.split('.').next().unwrap_or(file_name);
    format!("{}.txt", stem)
}

fn decrypt_file(path: &Path, dst: &Path, key: &SignedSecretKey, password: &Password) -> Result<()> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("Invalid file name: {}", path.display()))?;
    let out_path = dst.join(decrypted_name(file_name));

    let (message, _) = Message::from_armor_file(path)
        .with_context(|| format!("Cannot parse armored message: {}", path.display()))?;
    let message = message
        .decrypt(password, key)
        .with_context(|| format!("Cannot decrypt {}", path.display()))?;
    let mut message = if message.is_compressed() {
        message
            .decompress()
            .with_context(|| format!("Cannot decompress {}", path.display()))?
    } else {
        message
    };

    let data = message
        .as_data_vec()
        .with_context(|| format!("Cannot read decrypted data: {}", path.display()))?;
    fs::write(&out_path, data)
        .with_context(|| format!("Cannot write plaintext: {}", out_path.display()))?;

    Ok(())
}
