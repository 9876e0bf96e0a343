//! PGPVault CLI - generate an OpenPGP key ring and batch
//! encrypt/decrypt folders of files.

use anyhow::Result;
use clap::Parser;

use pgpvault::cli::{commands, Cli, Commands};
use pgpvault::config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("pgpvault={}", log_level).parse().unwrap())
                .add_directive(format!("pgpv={}", log_level).parse().unwrap()),
        )
        .with_target(false)
        .init();

    // `init` runs before any config exists
    if matches!(cli.command, Commands::Init) {
        return commands::init(cli.config.as_deref());
    }

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };

    match cli.command {
        Commands::Run => commands::run(&config),
        Commands::Keygen => commands::keygen(&config),
        Commands::Encrypt => commands::encrypt(&config),
        Commands::Decrypt => commands::decrypt(&config),
        Commands::Init => unreachable!(),
    }
}
