//! VON SDK — the pool, wallet and agent surface the connector drives.
//!
//! The traits in [`traits`] describe what the connector needs from an
//! identity SDK:
//! - node pools opened against a genesis transactions file
//! - agents backed by a seeded wallet, exposing their DID
//! - issuer, verifier and holder-prover agent flavours
//!
//! [`local`] provides an in-process "virtual" implementation. It derives
//! keys and DIDs from wallet seeds the way an Indy wallet does, but never
//! talks to a ledger.

pub mod error;
pub mod local;
pub mod traits;
pub mod types;
pub mod wallet;

pub use error::SdkError;
pub use local::{LocalAgent, LocalHolderProver, LocalIssuer, LocalPool, LocalSdk, LocalVerifier};
pub use traits::{Agent, HolderProver, Issuer, NodePool, Sdk, Verifier};
pub use types::{Credential, Proof};
pub use wallet::{WalletConfig, WalletCredentials, WalletOptions};
