use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The credential-exchange role a connector instance plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleKind {
    Issuer,
    Verifier,
    Holder,
}

impl RoleKind {
    /// Lowercase suffix used in pool names (`<app>-issuer`).
    pub fn suffix(&self) -> &'static str {
        match self {
            RoleKind::Issuer => "issuer",
            RoleKind::Verifier => "verifier",
            RoleKind::Holder => "holder",
        }
    }

    /// Capitalised label used in wallet display names (`<name> Issuer Wallet`).
    pub fn label(&self) -> &'static str {
        match self {
            RoleKind::Issuer => "Issuer",
            RoleKind::Verifier => "Verifier",
            RoleKind::Holder => "Holder",
        }
    }
}

impl fmt::Display for RoleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

impl FromStr for RoleKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "issuer" => Ok(RoleKind::Issuer),
            "verifier" => Ok(RoleKind::Verifier),
            "holder" => Ok(RoleKind::Holder),
            other => Err(CoreError::Config(format!("unknown role: {other}"))),
        }
    }
}
