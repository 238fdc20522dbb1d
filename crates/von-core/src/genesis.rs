//! Genesis transaction file location.

use std::path::{Path, PathBuf};

use crate::config::ConnectorConfig;
use crate::error::CoreError;

/// Path used when no genesis location is configured.
pub const DEFAULT_GENESIS_PATH: &str = "/opt/app-root/genesis";

/// Resolves where the ledger's genesis transactions live.
#[derive(Debug, Clone)]
pub struct GenesisLocator {
    path: PathBuf,
    url: Option<String>,
    client: reqwest::Client,
}

impl GenesisLocator {
    /// Create a locator for an explicit path and optional download URL.
    pub fn new(path: impl Into<PathBuf>, url: Option<String>) -> Self {
        Self {
            path: path.into(),
            url,
            client: reqwest::Client::new(),
        }
    }

    /// Use `client` for genesis downloads.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Resolve from configuration, falling back to [`DEFAULT_GENESIS_PATH`].
    pub fn from_config(config: &ConnectorConfig) -> Self {
        let path = config
            .genesis
            .path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_GENESIS_PATH));
        Self::new(path, config.genesis.url.clone())
    }

    /// The resolved genesis transactions path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The configured download URL, if any.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Make sure the genesis file exists, downloading it when a URL is configured.
    ///
    /// An existing file is never rewritten.
    pub async fn ensure(&self) -> Result<&Path, CoreError> {
        if tokio::fs::try_exists(&self.path).await? {
            return Ok(&self.path);
        }
        let Some(url) = &self.url else {
            return Err(CoreError::GenesisNotFound(self.path.clone()));
        };

        tracing::info!(url = %url, path = %self.path.display(), "downloading genesis transactions");

        let body = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| CoreError::GenesisDownload(e.to_string()))?
            .text()
            .await
            .map_err(|e| CoreError::GenesisDownload(e.to_string()))?;

        if body.trim().is_empty() {
            return Err(CoreError::GenesisDownload(format!(
                "empty genesis document from {url}"
            )));
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(&self.path, body).await?;
        Ok(&self.path)
    }
}
