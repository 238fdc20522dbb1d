/// SDK-level errors.
#[derive(Debug, thiserror::Error)]
pub enum SdkError {
    #[error("pool {0} is not open")]
    PoolNotOpen(String),

    #[error("pool {0} is already open")]
    PoolAlreadyOpen(String),

    #[error("wallet {0} is not open")]
    NotOpen(String),

    #[error("wallet {0} is already open")]
    AlreadyOpen(String),

    #[error("genesis error: {0}")]
    Genesis(String),

    #[error("invalid seed: {0}")]
    InvalidSeed(String),

    #[error("master secret {0} already exists")]
    MasterSecretExists(String),

    #[error("no master secret in wallet {0}")]
    MasterSecretMissing(String),

    #[error("credential not found: {0}")]
    CredentialNotFound(String),

    #[error("verification error: {0}")]
    Verification(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
