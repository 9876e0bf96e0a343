//! PGPVault - generate an OpenPGP key ring and batch encrypt/decrypt
//! folders of files.

pub mod cli;
pub mod config;
pub mod crypto;
pub mod pipeline;
