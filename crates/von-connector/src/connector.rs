use von_core::{ConnectorConfig, GenesisLocator, WalletSeed};
use von_sdk::Sdk;

use crate::did::convert_seed_to_did;
use crate::error::ConnectorError;
use crate::wrapper::{Holder, Issuer, RoleWrapper, Verifier};

/// Validated process-wide state: SDK, configuration, wallet seed and genesis location.
pub struct Connector<S: Sdk> {
    sdk: S,
    config: ConnectorConfig,
    seed: WalletSeed,
    genesis: GenesisLocator,
}

impl<S: Sdk> Connector<S> {
    /// Initialise from the environment. Fails before anything else is built
    /// if `INDY_WALLET_SEED` is missing or not 32 characters long.
    pub fn init(sdk: S, config: ConnectorConfig) -> Result<Self, ConnectorError> {
        let seed = WalletSeed::from_env()?;
        Ok(Self::with_seed(sdk, config, seed))
    }

    /// Initialise with an already validated seed.
    pub fn with_seed(sdk: S, config: ConnectorConfig, seed: WalletSeed) -> Self {
        let genesis = GenesisLocator::from_config(&config);
        tracing::debug!(
            name = %config.name,
            genesis = %genesis.path().display(),
            "connector initialised"
        );
        Self {
            sdk,
            config,
            seed,
            genesis,
        }
    }

    pub fn config(&self) -> &ConnectorConfig {
        &self.config
    }

    pub fn genesis(&self) -> &GenesisLocator {
        &self.genesis
    }

    /// Build an issuer wrapper.
    pub fn issuer(&self) -> Issuer<S> {
        RoleWrapper::new(&self.sdk, &self.config, &self.seed, &self.genesis)
    }

    /// Build a verifier wrapper.
    pub fn verifier(&self) -> Verifier<S> {
        RoleWrapper::new(&self.sdk, &self.config, &self.seed, &self.genesis)
    }

    /// Build a holder wrapper.
    pub fn holder(&self) -> Holder<S> {
        RoleWrapper::new(&self.sdk, &self.config, &self.seed, &self.genesis)
    }

    /// DID for an arbitrary seed, against this connector's genesis file.
    pub async fn seed_to_did(&self, seed: &str) -> Result<String, ConnectorError> {
        convert_seed_to_did(&self.sdk, self.genesis.path(), seed).await
    }

    /// DID of this connector's own wallet seed.
    pub async fn did(&self) -> Result<String, ConnectorError> {
        self.seed_to_did(self.seed.expose()).await
    }
}
