use von_core::CoreError;
use von_sdk::SdkError;

/// Connector errors. SDK and core failures pass through unchanged.
#[derive(Debug, thiserror::Error)]
pub enum ConnectorError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Sdk(#[from] SdkError),

    #[error("agent opened without a DID")]
    DidUnavailable,
}
