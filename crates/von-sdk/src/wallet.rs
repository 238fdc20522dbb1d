use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// Wallet configuration options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletOptions {
    /// Credential-definition freshness time, in seconds.
    pub freshness_time: u64,
}

/// Wallet access credentials.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletCredentials {
    pub key: String,
}

impl fmt::Debug for WalletCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletCredentials")
            .field("key", &if self.key.is_empty() { "" } else { "***" })
            .finish()
    }
}

/// Everything needed to build (not yet open) a wallet.
#[derive(Clone)]
pub struct WalletConfig {
    /// Name of the pool the wallet is bound to.
    pub pool_name: String,
    /// Seed the wallet's signing key is derived from.
    pub seed: Zeroizing<String>,
    /// Wallet display name.
    pub name: String,
    /// Storage type tag, e.g. `virtual`. `None` lets the SDK choose.
    pub wallet_type: Option<String>,
    pub config: WalletOptions,
    pub credentials: WalletCredentials,
}

impl WalletConfig {
    /// Wallet with default type, options and credentials.
    pub fn new(pool_name: impl Into<String>, seed: &str, name: impl Into<String>) -> Self {
        Self {
            pool_name: pool_name.into(),
            seed: Zeroizing::new(seed.to_string()),
            name: name.into(),
            wallet_type: None,
            config: WalletOptions::default(),
            credentials: WalletCredentials::default(),
        }
    }

    /// Set the storage type tag.
    pub fn with_type(mut self, wallet_type: impl Into<String>) -> Self {
        self.wallet_type = Some(wallet_type.into());
        self
    }

    /// Set the wallet options.
    pub fn with_options(mut self, config: WalletOptions) -> Self {
        self.config = config;
        self
    }

    /// Set the access credentials.
    pub fn with_credentials(mut self, credentials: WalletCredentials) -> Self {
        self.credentials = credentials;
        self
    }
}

impl fmt::Debug for WalletConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletConfig")
            .field("pool_name", &self.pool_name)
            .field("seed", &"***")
            .field("name", &self.name)
            .field("wallet_type", &self.wallet_type)
            .field("config", &self.config)
            .field("credentials", &self.credentials)
            .finish()
    }
}
