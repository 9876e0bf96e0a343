//! Command implementations for the PGPVault CLI.
//!
//! Main commands:
//! - run: key generation, then encrypt-all, then decrypt-all
//! - keygen / encrypt / decrypt: the individual stages
//! - init: write a default config and create the folders

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

use crate::config::Config;
use crate::crypto::keyring;
use crate::pipeline::{decrypt_folder, encrypt_folder, BatchSummary};

/// Run all three stages in sequence.
///
/// A stage failure is logged and shown on the terminal but does not
/// prevent the later stages from attempting to run.
pub fn run(config: &Config) -> Result<()> {
    println!("{}", "🔐 PGPVault Run".bold().cyan());
    println!();

    if let Err(e) = keygen(config) {
        tracing::error!("Key generation failed: {:#}", e);
        println!("  {} Key generation failed: {:#}", "✗".red(), e);
    }

    if let Err(e) = encrypt(config) {
        tracing::error!("Encryption stage failed: {:#}", e);
        println!("  {} Encryption failed: {:#}", "✗".red(), e);
    }

    if let Err(e) = decrypt(config) {
        tracing::error!("Decryption stage failed: {:#}", e);
        println!("  {} Decryption failed: {:#}", "✗".red(), e);
    }

    Ok(())
}

/// Generate the key ring pair described by the config.
pub fn keygen(config: &Config) -> Result<()> {
    println!("{}", "🔑 Generating key ring (RSA-2048)...".cyan());

    keyring::create_key_ring(
        &config.keys.public_ring,
        &config.keys.secret_ring,
        &config.user_id,
        &config.passphrase,
    )?;

    println!(
        "  {} Public ring:  {}",
        "✓".green(),
        config.keys.public_ring.display()
    );
    println!(
        "  {} Secret ring:  {}",
        "✓".green(),
        config.keys.secret_ring.display()
    );
    Ok(())
}

/// Encrypt every file in the generated folder into the encrypted folder.
pub fn encrypt(config: &Config) -> Result<()> {
    println!(
        "{} {}",
        "🔒 Encrypting".cyan(),
        config.folders.generated.display()
    );

    let summary = encrypt_folder(
        &config.folders.generated,
        &config.folders.encrypted,
        &config.keys.public_ring,
        &config.user_id,
    )?;
    report(&summary, "encrypted");
    Ok(())
}

/// Decrypt every file in the encrypted folder into the decrypted folder.
pub fn decrypt(config: &Config) -> Result<()> {
    println!(
        "{} {}",
        "🔓 Decrypting".cyan(),
        config.folders.encrypted.display()
    );

    let summary = decrypt_folder(
        &config.folders.encrypted,
        &config.folders.decrypted,
        &config.keys.secret_ring,
        &config.user_id,
        &config.passphrase,
    )?;
    report(&summary, "decrypted");
    Ok(())
}

/// Write a default config file and create the pipeline folders.
pub fn init(config_path: Option<&Path>) -> Result<()> {
    let path = config_path
        .map(|p| p.to_path_buf())
        .unwrap_or_else(Config::default_config_path);

    if path.exists() {
        println!(
            "{} Config already exists: {}",
            "•".yellow(),
            path.display()
        );
        let config = Config::load(&path)?;
        config.ensure_folders()?;
        return Ok(());
    }

    let config = Config::default();
    config.save(&path).context("Cannot write default config")?;
    config.ensure_folders()?;

    println!("{} Config written: {}", "✓".green(), path.display());
    println!();
    println!("Edit user_id and passphrase before generating keys.");
    Ok(())
}

fn report(summary: &BatchSummary, verb: &str) {
    if summary.total() == 0 {
        println!("  {} No files to process", "•".yellow());
        return;
    }
    println!(
        "  {} {} file(s) {}, {} failed",
        "✓".green(),
        summary.processed,
        verb,
        summary.failed.len()
    );
    for (path, err) in &summary.failed {
        println!("    {} {}: {}", "✗".red(), path.display(), err);
    }
}
