use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use super::keys::DerivedKey;
use super::pool::LocalPool;
use crate::error::SdkError;
use crate::traits::Agent;
use crate::wallet::WalletConfig;

/// Base agent: a seeded wallet bound to a pool.
///
/// Opening only unlocks the wallet; the pool is not consulted. Role agents
/// wrap this and additionally insist on an open pool.
pub struct LocalAgent {
    pool: Arc<LocalPool>,
    wallet: WalletConfig,
    key: Mutex<Option<DerivedKey>>,
}

impl LocalAgent {
    /// Create a closed agent.
    pub fn new(pool: Arc<LocalPool>, wallet: WalletConfig) -> Self {
        Self {
            pool,
            wallet,
            key: Mutex::new(None),
        }
    }

    /// The pool this agent is bound to.
    pub fn pool(&self) -> &Arc<LocalPool> {
        &self.pool
    }

    /// The wallet configuration the agent was built with.
    pub fn wallet(&self) -> &WalletConfig {
        &self.wallet
    }

    pub fn is_open(&self) -> bool {
        self.key().is_some()
    }

    fn key(&self) -> MutexGuard<'_, Option<DerivedKey>> {
        self.key.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Run `f` against the open wallet key.
    pub(crate) fn with_key<T>(&self, f: impl FnOnce(&DerivedKey) -> T) -> Result<T, SdkError> {
        match self.key().as_ref() {
            Some(key) => Ok(f(key)),
            None => Err(SdkError::NotOpen(self.wallet.name.clone())),
        }
    }
}

#[async_trait]
impl Agent for LocalAgent {
    fn wallet_name(&self) -> &str {
        &self.wallet.name
    }

    async fn open(&self) -> Result<(), SdkError> {
        let mut slot = self.key();
        if slot.is_some() {
            return Err(SdkError::AlreadyOpen(self.wallet.name.clone()));
        }
        let key = DerivedKey::from_seed(&self.wallet.seed)?;
        tracing::debug!(
            wallet = %self.wallet.name,
            wallet_type = self.wallet.wallet_type.as_deref().unwrap_or("default"),
            did = %key.did,
            "wallet opened"
        );
        *slot = Some(key);
        Ok(())
    }

    async fn close(&self) -> Result<(), SdkError> {
        if self.key().take().is_none() {
            return Err(SdkError::NotOpen(self.wallet.name.clone()));
        }
        tracing::debug!(wallet = %self.wallet.name, "wallet closed");
        Ok(())
    }

    fn did(&self) -> Option<String> {
        self.key().as_ref().map(|k| k.did.clone())
    }

    fn verkey(&self) -> Option<String> {
        self.key().as_ref().map(|k| k.verkey.clone())
    }
}
