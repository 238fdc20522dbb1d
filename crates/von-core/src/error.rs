use std::path::PathBuf;

/// Core connector errors.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("INDY_WALLET_SEED must be set and be 32 characters long")]
    InvalidSeed,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("genesis transactions not found at {}", .0.display())]
    GenesisNotFound(PathBuf),

    #[error("genesis download failed: {0}")]
    GenesisDownload(String),
}
