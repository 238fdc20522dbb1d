//! Seed-derived Ed25519 keys with Indy-style DID and verkey encodings.

use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};

use crate::error::SdkError;

/// Signing key plus its public encodings.
pub(crate) struct DerivedKey {
    signing_key: SigningKey,
    pub(crate) did: String,
    pub(crate) verkey: String,
}

impl DerivedKey {
    /// Derive from a 32-byte seed. The DID is base58 of the first 16 bytes
    /// of the verification key; the verkey is base58 of all 32.
    pub(crate) fn from_seed(seed: &str) -> Result<Self, SdkError> {
        let bytes: [u8; 32] = seed.as_bytes().try_into().map_err(|_| {
            SdkError::InvalidSeed(format!("seed must be 32 bytes, got {}", seed.len()))
        })?;
        let signing_key = SigningKey::from_bytes(&bytes);
        let public = signing_key.verifying_key().to_bytes();
        Ok(Self {
            signing_key,
            did: bs58::encode(&public[..16]).into_string(),
            verkey: bs58::encode(public).into_string(),
        })
    }

    /// Hex-encoded signature over `message`.
    pub(crate) fn sign(&self, message: &[u8]) -> String {
        hex::encode(self.signing_key.sign(message).to_bytes())
    }
}

/// The DID a base58 verkey resolves to, if the verkey is well formed.
pub(crate) fn did_for_verkey(verkey: &str) -> Option<String> {
    let bytes = bs58::decode(verkey).into_vec().ok()?;
    if bytes.len() != 32 {
        return None;
    }
    Some(bs58::encode(&bytes[..16]).into_string())
}

/// Check a hex signature against a base58 verkey. Malformed input fails verification.
pub(crate) fn verify(verkey: &str, message: &[u8], signature: &str) -> bool {
    let Ok(key_bytes) = bs58::decode(verkey).into_vec() else {
        return false;
    };
    let Ok(key_bytes) = <[u8; 32]>::try_from(key_bytes.as_slice()) else {
        return false;
    };
    let Ok(key) = VerifyingKey::from_bytes(&key_bytes) else {
        return false;
    };
    let Ok(sig_bytes) = hex::decode(signature) else {
        return false;
    };
    let Ok(sig) = ed25519_dalek::Signature::from_slice(&sig_bytes) else {
        return false;
    };
    key.verify(message, &sig).is_ok()
}
