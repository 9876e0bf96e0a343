//! CLI definitions and command implementations for PGPVault.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// PGPVault - OpenPGP key ring generation and batch folder encryption
#[derive(Parser)]
#[command(name = "pgpv")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file (default: ~/.config/pgpvault/pgpvault.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the key ring, then encrypt and decrypt all folders
    Run,

    /// Generate a fresh RSA key ring pair (overwrites existing rings)
    Keygen,

    /// Encrypt every file in the generated folder
    Encrypt,

    /// Decrypt every file in the encrypted folder
    Decrypt,

    /// Write a default config file and create the pipeline folders
    Init,
}
