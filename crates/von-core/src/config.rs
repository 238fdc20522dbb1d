//! Connector configuration loading and management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::CoreError;
use crate::types::RoleKind;

/// Process-wide connector configuration, loaded once at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectorConfig {
    /// Human-readable service name, used in wallet display names.
    #[serde(default = "default_name")]
    pub name: String,

    /// Prefix for per-role pool names.
    #[serde(default = "default_app")]
    pub app: String,

    /// Genesis transaction settings.
    #[serde(default)]
    pub genesis: GenesisConfig,

    /// Wallet settings shared by every role.
    #[serde(default)]
    pub wallet: WalletSettings,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GenesisConfig {
    /// Path to the genesis transactions file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// URL to fetch the genesis transactions from when the file is missing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Settings applied to every role wallet.
///
/// The defaults are the fixed `virtual` / `0` / empty-key wallet; a
/// `[wallet]` section replaces them for all roles at once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletSettings {
    /// Wallet storage type tag handed to the SDK.
    #[serde(default = "default_wallet_type")]
    pub wallet_type: String,
    /// Credential-definition freshness time, in seconds.
    #[serde(default)]
    pub freshness_time: u64,
    /// Wallet access key.
    #[serde(default)]
    pub key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (text, json).
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_name() -> String {
    "von-connector".into()
}
fn default_app() -> String {
    "permitify".into()
}
fn default_wallet_type() -> String {
    "virtual".into()
}
fn default_log_level() -> String {
    "info".into()
}
fn default_log_format() -> String {
    "text".into()
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            app: default_app(),
            genesis: GenesisConfig::default(),
            wallet: WalletSettings::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for WalletSettings {
    fn default() -> Self {
        Self {
            wallet_type: default_wallet_type(),
            freshness_time: 0,
            key: String::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl ConnectorConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            toml::from_str(&contents)
                .map_err(|e| CoreError::Config(format!("{}: {e}", path.display())))
        } else {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Save the current config to a TOML file.
    pub fn save(&self, path: &Path) -> Result<(), CoreError> {
        let contents =
            toml::to_string_pretty(self).map_err(|e| CoreError::Config(e.to_string()))?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Apply overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(name) = lookup("VON_CONNECTOR_NAME") {
            self.name = name;
        }
        if let Some(app) = lookup("VON_CONNECTOR_APP") {
            self.app = app;
        }
        if let Some(path) = lookup("INDY_GENESIS_PATH") {
            self.genesis.path = Some(PathBuf::from(path));
        }
        if let Some(url) = lookup("INDY_GENESIS_URL") {
            self.genesis.url = Some(url);
        }
        if let Some(level) = lookup("VON_LOG_LEVEL") {
            self.logging.level = level;
        }
    }

    /// Pool name for a role, e.g. `permitify-issuer`.
    pub fn pool_name(&self, role: RoleKind) -> String {
        format!("{}-{}", self.app, role.suffix())
    }

    /// Wallet display name for a role, e.g. `My Service Issuer Wallet`.
    pub fn wallet_display_name(&self, role: RoleKind) -> String {
        format!("{} {} Wallet", self.name, role.label())
    }
}
