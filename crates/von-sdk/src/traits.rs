use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::SdkError;
use crate::types::{Credential, Proof};
use crate::wallet::WalletConfig;

/// A named connection context to a ledger network.
#[async_trait]
pub trait NodePool: Send + Sync {
    /// Pool name.
    fn name(&self) -> &str;

    /// Genesis transactions file the pool connects with.
    fn genesis_path(&self) -> &Path;

    /// Whether the pool is currently open.
    fn is_open(&self) -> bool;

    /// Connect to the ledger.
    async fn open(&self) -> Result<(), SdkError>;

    /// Disconnect from the ledger.
    async fn close(&self) -> Result<(), SdkError>;
}

/// An agent backed by a seeded wallet.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Name of the agent's wallet.
    fn wallet_name(&self) -> &str;

    /// Open (unlock) the wallet. Role agents may also require an open pool.
    async fn open(&self) -> Result<(), SdkError>;

    /// Close the wallet.
    async fn close(&self) -> Result<(), SdkError>;

    /// The agent's DID, available while open.
    fn did(&self) -> Option<String>;

    /// The agent's base58 verification key, available while open.
    fn verkey(&self) -> Option<String>;
}

/// Issues credentials.
#[async_trait]
pub trait Issuer: Agent {
    async fn issue(
        &self,
        subject_did: &str,
        claims: serde_json::Value,
    ) -> Result<Credential, SdkError>;
}

/// Verifies credentials and presented proofs.
#[async_trait]
pub trait Verifier: Agent {
    async fn verify_credential(&self, credential: &Credential) -> Result<bool, SdkError>;

    async fn verify_proof(&self, proof: &Proof, nonce: &str) -> Result<bool, SdkError>;
}

/// Holds credentials and proves them to verifiers.
#[async_trait]
pub trait HolderProver: Agent {
    /// Create the secret that binds issued credentials to this holder.
    async fn create_master_secret(&self, id: &str) -> Result<(), SdkError>;

    /// Store a credential, returning its id.
    async fn store_credential(&self, credential: Credential) -> Result<String, SdkError>;

    /// Present a stored credential against a verifier nonce.
    async fn create_proof(&self, credential_id: &str, nonce: &str) -> Result<Proof, SdkError>;
}

/// Factory for the SDK's pool and agent handles. Construction performs no I/O.
pub trait Sdk: Send + Sync + 'static {
    type Pool: NodePool + 'static;
    type Agent: Agent + 'static;
    type Issuer: Issuer + 'static;
    type Verifier: Verifier + 'static;
    type HolderProver: HolderProver + 'static;

    fn pool(&self, name: &str, genesis_path: &Path) -> Arc<Self::Pool>;

    fn agent(&self, pool: Arc<Self::Pool>, wallet: WalletConfig) -> Self::Agent;

    fn issuer(&self, pool: Arc<Self::Pool>, wallet: WalletConfig) -> Self::Issuer;

    fn verifier(&self, pool: Arc<Self::Pool>, wallet: WalletConfig) -> Self::Verifier;

    fn holder_prover(&self, pool: Arc<Self::Pool>, wallet: WalletConfig) -> Self::HolderProver;
}
