use std::path::Path;

use von_sdk::{Agent, NodePool, Sdk, WalletConfig};

use crate::error::ConnectorError;

/// Pool name used by the seed-to-DID helper.
pub const UTIL_POOL_NAME: &str = "util-agent";

/// Derive the DID for an arbitrary seed.
///
/// Opens a throwaway base agent whose wallet is named `<seed>-wallet`, reads
/// its DID and closes it again. Only the wallet is opened; the pool handle is
/// never connected, so there is nothing else to close.
pub async fn convert_seed_to_did<S: Sdk>(
    sdk: &S,
    genesis_path: &Path,
    seed: &str,
) -> Result<String, ConnectorError> {
    let pool = sdk.pool(UTIL_POOL_NAME, genesis_path);
    let wallet = WalletConfig::new(pool.name(), seed, format!("{seed}-wallet"));
    let agent = sdk.agent(pool, wallet);

    agent.open().await?;
    let did = agent.did();
    agent.close().await?;

    did.filter(|d| !d.is_empty())
        .ok_or(ConnectorError::DidUnavailable)
}
