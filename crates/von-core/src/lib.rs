//! VON Core — configuration, genesis location and wallet seed validation
//! shared by the connector crates.

pub mod config;
pub mod error;
pub mod genesis;
pub mod seed;
pub mod types;

pub use config::{ConnectorConfig, GenesisConfig, LoggingConfig, WalletSettings};
pub use error::CoreError;
pub use genesis::GenesisLocator;
pub use seed::WalletSeed;
pub use types::RoleKind;
