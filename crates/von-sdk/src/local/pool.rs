use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::error::SdkError;
use crate::traits::NodePool;

/// Indy NODE transaction type.
const NODE_TXN_TYPE: &str = "0";

/// Parsed genesis transactions held while the pool is open.
#[derive(Debug, Clone)]
struct GenesisLedger {
    transactions: usize,
    nodes: Vec<String>,
}

impl GenesisLedger {
    /// One JSON transaction per non-empty line.
    fn parse(contents: &str) -> Result<Self, SdkError> {
        let mut transactions = 0;
        let mut nodes = Vec::new();

        for (lineno, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let txn: serde_json::Value = serde_json::from_str(line).map_err(|e| {
                SdkError::Genesis(format!("line {}: invalid transaction: {e}", lineno + 1))
            })?;
            transactions += 1;

            let inner = &txn["txn"];
            if inner["type"].as_str() == Some(NODE_TXN_TYPE) {
                if let Some(alias) = inner["data"]["data"]["alias"].as_str() {
                    nodes.push(alias.to_string());
                }
            }
        }

        if transactions == 0 {
            return Err(SdkError::Genesis("no genesis transactions".into()));
        }
        Ok(Self {
            transactions,
            nodes,
        })
    }
}

/// Pool handle that reads its genesis file on open and keeps no connection.
#[derive(Debug)]
pub struct LocalPool {
    name: String,
    genesis_path: PathBuf,
    ledger: Mutex<Option<GenesisLedger>>,
}

impl LocalPool {
    /// Create a closed pool handle.
    pub fn new(name: &str, genesis_path: &Path) -> Self {
        Self {
            name: name.to_string(),
            genesis_path: genesis_path.to_path_buf(),
            ledger: Mutex::new(None),
        }
    }

    fn ledger(&self) -> MutexGuard<'_, Option<GenesisLedger>> {
        self.ledger.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Node aliases from the genesis file; empty while closed.
    pub fn nodes(&self) -> Vec<String> {
        self.ledger()
            .as_ref()
            .map(|l| l.nodes.clone())
            .unwrap_or_default()
    }

    /// Number of genesis transactions; zero while closed.
    pub fn transaction_count(&self) -> usize {
        self.ledger().as_ref().map_or(0, |l| l.transactions)
    }

    pub(crate) fn ensure_open(&self) -> Result<(), SdkError> {
        if self.is_open() {
            Ok(())
        } else {
            Err(SdkError::PoolNotOpen(self.name.clone()))
        }
    }
}

#[async_trait]
impl NodePool for LocalPool {
    fn name(&self) -> &str {
        &self.name
    }

    fn genesis_path(&self) -> &Path {
        &self.genesis_path
    }

    fn is_open(&self) -> bool {
        self.ledger().is_some()
    }

    async fn open(&self) -> Result<(), SdkError> {
        if self.is_open() {
            return Err(SdkError::PoolAlreadyOpen(self.name.clone()));
        }

        let contents = tokio::fs::read_to_string(&self.genesis_path)
            .await
            .map_err(|e| SdkError::Genesis(format!("{}: {e}", self.genesis_path.display())))?;
        let ledger = GenesisLedger::parse(&contents)?;

        tracing::debug!(
            pool = %self.name,
            transactions = ledger.transactions,
            nodes = ledger.nodes.len(),
            "pool opened"
        );

        let mut slot = self.ledger();
        if slot.is_some() {
            return Err(SdkError::PoolAlreadyOpen(self.name.clone()));
        }
        *slot = Some(ledger);
        Ok(())
    }

    async fn close(&self) -> Result<(), SdkError> {
        if self.ledger().take().is_none() {
            return Err(SdkError::PoolNotOpen(self.name.clone()));
        }
        tracing::debug!(pool = %self.name, "pool closed");
        Ok(())
    }
}
