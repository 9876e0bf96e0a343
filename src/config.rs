//! Config module - Manages PGPVault configuration (pgpvault.toml).
//!
//! Configuration file contains:
//! - Key ring identity (user id, passphrase)
//! - Key ring file locations
//! - Folder roles for the batch pipeline

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Key ring file locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeysConfig {
    /// ASCII-armored public key ring
    #[serde(default = "default_public_ring")]
    pub public_ring: PathBuf,

    /// ASCII-armored, passphrase-protected secret key ring
    #[serde(default = "default_secret_ring")]
    pub secret_ring: PathBuf,
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self {
            public_ring: default_public_ring(),
            secret_ring: default_secret_ring(),
        }
    }
}

fn default_public_ring() -> PathBuf {
    default_data_dir().join("keys").join("public.asc")
}

fn default_secret_ring() -> PathBuf {
    default_data_dir().join("keys").join("secret.asc")
}

/// Folder roles for the batch pipeline.
///
/// `encrypted` is a single setting: it is both the destination of the
/// encrypt stage and the source of the decrypt stage, so the two
/// stages cannot drift apart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoldersConfig {
    /// Plaintext files awaiting encryption
    #[serde(default = "default_generated")]
    pub generated: PathBuf,

    /// Ciphertext files (encrypt destination, decrypt source)
    #[serde(default = "default_encrypted")]
    pub encrypted: PathBuf,

    /// Restored plaintext files
    #[serde(default = "default_decrypted")]
    pub decrypted: PathBuf,
}

impl Default for FoldersConfig {
    fn default() -> Self {
        Self {
            generated: default_generated(),
            encrypted: default_encrypted(),
            decrypted: default_decrypted(),
        }
    }
}

fn default_generated() -> PathBuf {
    default_data_dir().join("generated")
}

fn default_encrypted() -> PathBuf {
    default_data_dir().join("encrypted")
}

fn default_decrypted() -> PathBuf {
    default_data_dir().join("decrypted")
}

/// Main PGPVault configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// User id embedded in the generated key ring
    #[serde(default = "default_user_id")]
    pub user_id: String,

    /// Passphrase protecting the secret key ring
    #[serde(default = "default_passphrase")]
    pub passphrase: String,

    /// Key ring file locations
    #[serde(default)]
    pub keys: KeysConfig,

    /// Pipeline folders
    #[serde(default)]
    pub folders: FoldersConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_id: default_user_id(),
            passphrase: default_passphrase(),
            keys: KeysConfig::default(),
            folders: FoldersConfig::default(),
        }
    }
}

fn default_user_id() -> String {
    "pgpvault".to_string()
}

fn default_passphrase() -> String {
    "changeme".to_string()
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pgpvault")
}

impl Config {
    /// Default config file path: `~/.config/pgpvault/pgpvault.toml`.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pgpvault")
            .join("pgpvault.toml")
    }

    /// Load config from a specific path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        Ok(config)
    }

    /// Load config from the default location.
    pub fn load_default() -> Result<Self> {
        let path = Self::default_config_path();
        if !path.exists() {
            anyhow::bail!(
                "No config file at {}. Run `pgpv init` first.",
                path.display()
            );
        }
        Self::load(&path)
    }

    /// Save config to a specific path.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create config dir: {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("Cannot serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Cannot write config file: {}", path.display()))?;
        Ok(())
    }

    /// Create the three pipeline folders if they do not exist yet.
    pub fn ensure_folders(&self) -> Result<()> {
        for dir in [
            &self.folders.generated,
            &self.folders.encrypted,
            &self.folders.decrypted,
        ] {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Cannot create folder: {}", dir.display()))?;
        }
        Ok(())
    }
}
