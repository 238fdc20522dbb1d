use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SdkError;

/// A credential signed by an issuer agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credential {
    pub id: String,
    pub issuer_did: String,
    /// Base58 verification key of the issuer.
    pub issuer_verkey: String,
    pub subject_did: String,
    pub claims: serde_json::Value,
    pub issued_at: DateTime<Utc>,
    /// Hex-encoded Ed25519 signature over [`Credential::signing_payload`].
    pub signature: String,
}

#[derive(Serialize)]
struct CredentialPayload<'a> {
    id: &'a str,
    issuer_did: &'a str,
    issuer_verkey: &'a str,
    subject_did: &'a str,
    claims: &'a serde_json::Value,
    issued_at: &'a DateTime<Utc>,
}

impl Credential {
    /// Canonical bytes covered by the issuer signature.
    pub fn signing_payload(&self) -> Result<Vec<u8>, SdkError> {
        let payload = CredentialPayload {
            id: &self.id,
            issuer_did: &self.issuer_did,
            issuer_verkey: &self.issuer_verkey,
            subject_did: &self.subject_did,
            claims: &self.claims,
            issued_at: &self.issued_at,
        };
        Ok(serde_json::to_vec(&payload)?)
    }
}

/// A holder's presentation of a credential, bound to a verifier nonce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proof {
    pub credential: Credential,
    pub holder_did: String,
    pub holder_verkey: String,
    pub nonce: String,
    /// Hex-encoded Ed25519 signature over [`Proof::signing_payload`].
    pub signature: String,
}

#[derive(Serialize)]
struct ProofPayload<'a> {
    credential_id: &'a str,
    credential_signature: &'a str,
    holder_did: &'a str,
    nonce: &'a str,
}

impl Proof {
    /// Canonical bytes covered by the holder signature.
    pub fn signing_payload(&self) -> Result<Vec<u8>, SdkError> {
        let payload = ProofPayload {
            credential_id: &self.credential.id,
            credential_signature: &self.credential.signature,
            holder_did: &self.holder_did,
            nonce: &self.nonce,
        };
        Ok(serde_json::to_vec(&payload)?)
    }
}
