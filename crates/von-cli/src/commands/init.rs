//! `von-connector init` — Write a default configuration file.

use std::path::Path;

use clap::Args;
use von_core::ConnectorConfig;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Service display name used in wallet names.
    #[arg(short, long)]
    pub name: Option<String>,

    /// Genesis transactions path.
    #[arg(short, long)]
    pub genesis: Option<std::path::PathBuf>,

    /// Overwrite an existing file.
    #[arg(long)]
    pub force: bool,
}

pub fn run(path: &Path, args: &InitArgs) -> anyhow::Result<()> {
    if path.exists() && !args.force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }

    let mut config = ConnectorConfig::default();
    if let Some(name) = &args.name {
        config.name = name.clone();
    }
    config.genesis.path = args.genesis.clone();
    config.save(path)?;

    println!("Wrote {}", path.display());
    Ok(())
}
