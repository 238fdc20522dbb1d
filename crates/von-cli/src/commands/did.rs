//! `von-connector did` — Print the DID derived from a wallet seed.

use clap::Args;
use serde::Serialize;
use von_connector::convert_seed_to_did;
use von_core::{ConnectorConfig, GenesisLocator, WalletSeed};
use von_sdk::LocalSdk;

#[derive(Args, Debug)]
pub struct DidArgs {
    /// Seed to derive from. Defaults to INDY_WALLET_SEED.
    #[arg(short, long)]
    pub seed: Option<String>,

    /// Print JSON instead of the bare DID.
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct DidOutput<'a> {
    did: &'a str,
}

pub async fn run(config: ConnectorConfig, args: &DidArgs) -> anyhow::Result<()> {
    let seed = match &args.seed {
        Some(seed) => seed.clone(),
        None => WalletSeed::from_env()?.expose().to_string(),
    };
    let genesis = GenesisLocator::from_config(&config);
    let did = convert_seed_to_did(&LocalSdk, genesis.path(), &seed).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&DidOutput { did: &did })?);
    } else {
        println!("{did}");
    }
    Ok(())
}
