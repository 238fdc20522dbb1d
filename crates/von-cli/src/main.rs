//! VON connector CLI — entry point.
//!
//! Subcommands: init, did, check.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use von_core::ConnectorConfig;

/// VON connector — Issuer, Verifier and Holder roles over an identity SDK.
#[derive(Parser, Debug)]
#[command(name = "von-connector", version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, global = true, default_value = "von-connector.toml")]
    config: PathBuf,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a default configuration file.
    Init(commands::init::InitArgs),
    /// Print the DID derived from a wallet seed.
    Did(commands::did::DidArgs),
    /// Open a role against the ledger, print its DID and close it again.
    Check(commands::check::CheckArgs),
}

fn init_tracing(config: &ConnectorConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    if config.logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // `init` writes the file the other commands read.
    if let Commands::Init(args) = &cli.command {
        return commands::init::run(&cli.config, args);
    }

    let mut config = ConnectorConfig::load(&cli.config)?;
    config.apply_env_overrides();
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    init_tracing(&config);

    tracing::info!("VON connector v{}", env!("CARGO_PKG_VERSION"));
    tracing::debug!(config = %cli.config.display(), command = ?cli.command, "running command");

    match &cli.command {
        Commands::Init(_) => Ok(()),
        Commands::Did(args) => commands::did::run(config, args).await,
        Commands::Check(args) => commands::check::run(config, args).await,
    }
}
