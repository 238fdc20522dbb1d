//! VON Connector — Issuer, Verifier and Holder roles on top of an identity SDK.
//!
//! A [`Connector`] validates the wallet seed once at startup and hands out
//! role wrappers. Each wrapper owns a pool handle and a role agent, neither
//! of which is opened until the wrapper is entered:
//!
//! - [`RoleWrapper::open`] opens the pool, then the agent, and returns a
//!   [`RoleGuard`]; closing the guard closes the agent, then the pool.
//! - [`RoleWrapper::run`] does the same around a closure and always tears
//!   down, even when the closure fails or panics.
//!
//! [`convert_seed_to_did`] derives the DID for an arbitrary seed.

pub mod connector;
pub mod did;
pub mod error;
pub mod role;
pub mod wrapper;

pub use connector::Connector;
pub use did::{convert_seed_to_did, UTIL_POOL_NAME};
pub use error::ConnectorError;
pub use role::{HolderRole, IssuerRole, Role, VerifierRole};
pub use wrapper::{Holder, Issuer, RoleGuard, RoleWrapper, Verifier};
