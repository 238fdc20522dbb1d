//! In-process "virtual" SDK backend.

mod agent;
mod keys;
mod pool;
mod roles;

use std::path::Path;
use std::sync::Arc;

pub use agent::LocalAgent;
pub use pool::LocalPool;
pub use roles::{LocalHolderProver, LocalIssuer, LocalVerifier};

use crate::traits::Sdk;
use crate::wallet::WalletConfig;

/// SDK backend that keeps every handle in process memory.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSdk;

impl Sdk for LocalSdk {
    type Pool = LocalPool;
    type Agent = LocalAgent;
    type Issuer = LocalIssuer;
    type Verifier = LocalVerifier;
    type HolderProver = LocalHolderProver;

    fn pool(&self, name: &str, genesis_path: &Path) -> Arc<LocalPool> {
        Arc::new(LocalPool::new(name, genesis_path))
    }

    fn agent(&self, pool: Arc<LocalPool>, wallet: WalletConfig) -> LocalAgent {
        LocalAgent::new(pool, wallet)
    }

    fn issuer(&self, pool: Arc<LocalPool>, wallet: WalletConfig) -> LocalIssuer {
        LocalIssuer::new(pool, wallet)
    }

    fn verifier(&self, pool: Arc<LocalPool>, wallet: WalletConfig) -> LocalVerifier {
        LocalVerifier::new(pool, wallet)
    }

    fn holder_prover(&self, pool: Arc<LocalPool>, wallet: WalletConfig) -> LocalHolderProver {
        LocalHolderProver::new(pool, wallet)
    }
}
