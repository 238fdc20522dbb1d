use std::sync::Arc;

use async_trait::async_trait;
use von_core::RoleKind;
use von_sdk::{Agent, HolderProver, Sdk, SdkError, WalletConfig};

/// What distinguishes one role wrapper from another.
#[async_trait]
pub trait Role<S: Sdk>: Send + Sync + 'static {
    const KIND: RoleKind;

    /// The SDK agent this role drives.
    type Instance: Agent + 'static;

    /// Build the (unopened) agent.
    fn build(sdk: &S, pool: Arc<S::Pool>, wallet: WalletConfig) -> Self::Instance;

    /// Runs after the agent opens, before the caller gets it.
    async fn on_open(_instance: &Self::Instance) -> Result<(), SdkError> {
        Ok(())
    }
}

/// Issues credentials.
pub struct IssuerRole;

/// Verifies credentials and proofs.
pub struct VerifierRole;

/// Holds and proves credentials. Each open creates a fresh master secret.
pub struct HolderRole;

#[async_trait]
impl<S: Sdk> Role<S> for IssuerRole {
    const KIND: RoleKind = RoleKind::Issuer;
    type Instance = S::Issuer;

    fn build(sdk: &S, pool: Arc<S::Pool>, wallet: WalletConfig) -> S::Issuer {
        sdk.issuer(pool, wallet)
    }
}

#[async_trait]
impl<S: Sdk> Role<S> for VerifierRole {
    const KIND: RoleKind = RoleKind::Verifier;
    type Instance = S::Verifier;

    fn build(sdk: &S, pool: Arc<S::Pool>, wallet: WalletConfig) -> S::Verifier {
        sdk.verifier(pool, wallet)
    }
}

#[async_trait]
impl<S: Sdk> Role<S> for HolderRole {
    const KIND: RoleKind = RoleKind::Holder;
    type Instance = S::HolderProver;

    fn build(sdk: &S, pool: Arc<S::Pool>, wallet: WalletConfig) -> S::HolderProver {
        sdk.holder_prover(pool, wallet)
    }

    async fn on_open(instance: &S::HolderProver) -> Result<(), SdkError> {
        let id = uuid::Uuid::new_v4().to_string();
        instance.create_master_secret(&id).await
    }
}
