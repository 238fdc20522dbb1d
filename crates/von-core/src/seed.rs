use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::CoreError;

/// Environment variable holding the wallet seed.
pub const SEED_ENV: &str = "INDY_WALLET_SEED";

/// Required seed length, in characters.
pub const SEED_LENGTH: usize = 32;

/// A validated 32-character wallet seed. Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct WalletSeed(String);

impl WalletSeed {
    /// Validate a seed value.
    pub fn new(value: impl Into<String>) -> Result<Self, CoreError> {
        let mut value = value.into();
        if value.chars().count() != SEED_LENGTH {
            value.zeroize();
            return Err(CoreError::InvalidSeed);
        }
        Ok(Self(value))
    }

    /// Read and validate `INDY_WALLET_SEED` from the process environment.
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_var(std::env::var(SEED_ENV).ok())
    }

    /// Validate an optional variable value; absence is the same failure as a bad length.
    pub fn from_var(value: Option<String>) -> Result<Self, CoreError> {
        match value {
            Some(value) => Self::new(value),
            None => Err(CoreError::InvalidSeed),
        }
    }

    /// The raw seed.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for WalletSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WalletSeed(***)")
    }
}
