//! Crypto module - OpenPGP key ring generation and loading via rPGP.

pub mod keyring;
