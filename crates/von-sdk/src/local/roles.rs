use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use super::agent::LocalAgent;
use super::keys::{self, DerivedKey};
use super::pool::LocalPool;
use crate::error::SdkError;
use crate::traits::{Agent, HolderProver, Issuer, Verifier};
use crate::types::{Credential, Proof};
use crate::wallet::WalletConfig;

/// Role agents open only against an open pool, then delegate to the base agent.
macro_rules! role_agent {
    ($ty:ty) => {
        #[async_trait]
        impl Agent for $ty {
            fn wallet_name(&self) -> &str {
                self.base.wallet_name()
            }

            async fn open(&self) -> Result<(), SdkError> {
                self.base.pool().ensure_open()?;
                self.base.open().await
            }

            async fn close(&self) -> Result<(), SdkError> {
                self.base.close().await
            }

            fn did(&self) -> Option<String> {
                self.base.did()
            }

            fn verkey(&self) -> Option<String> {
                self.base.verkey()
            }
        }
    };
}

/// Issuer agent signing credentials with its wallet key.
pub struct LocalIssuer {
    base: LocalAgent,
}

impl LocalIssuer {
    pub fn new(pool: Arc<LocalPool>, wallet: WalletConfig) -> Self {
        Self {
            base: LocalAgent::new(pool, wallet),
        }
    }
}

role_agent!(LocalIssuer);

#[async_trait]
impl Issuer for LocalIssuer {
    async fn issue(
        &self,
        subject_did: &str,
        claims: serde_json::Value,
    ) -> Result<Credential, SdkError> {
        let (did, verkey) = self.base.with_key(|k| (k.did.clone(), k.verkey.clone()))?;
        let mut credential = Credential {
            id: uuid::Uuid::new_v4().to_string(),
            issuer_did: did,
            issuer_verkey: verkey,
            subject_did: subject_did.to_string(),
            claims,
            issued_at: Utc::now(),
            signature: String::new(),
        };
        let payload = credential.signing_payload()?;
        credential.signature = self.base.with_key(|k| k.sign(&payload))?;

        tracing::info!(
            issuer = %credential.issuer_did,
            subject = subject_did,
            credential_id = %credential.id,
            "credential issued"
        );
        Ok(credential)
    }
}

/// Verifier agent checking issuer and holder signatures.
pub struct LocalVerifier {
    base: LocalAgent,
}

impl LocalVerifier {
    pub fn new(pool: Arc<LocalPool>, wallet: WalletConfig) -> Self {
        Self {
            base: LocalAgent::new(pool, wallet),
        }
    }

    fn check_credential(credential: &Credential) -> Result<bool, SdkError> {
        if keys::did_for_verkey(&credential.issuer_verkey).as_deref()
            != Some(credential.issuer_did.as_str())
        {
            return Ok(false);
        }
        let payload = credential.signing_payload()?;
        Ok(keys::verify(
            &credential.issuer_verkey,
            &payload,
            &credential.signature,
        ))
    }
}

role_agent!(LocalVerifier);

#[async_trait]
impl Verifier for LocalVerifier {
    async fn verify_credential(&self, credential: &Credential) -> Result<bool, SdkError> {
        self.base.with_key(|_| ())?;
        let valid = Self::check_credential(credential)?;
        tracing::debug!(credential_id = %credential.id, valid, "credential verified");
        Ok(valid)
    }

    async fn verify_proof(&self, proof: &Proof, nonce: &str) -> Result<bool, SdkError> {
        self.base.with_key(|_| ())?;
        if proof.nonce != nonce {
            tracing::debug!(credential_id = %proof.credential.id, "proof nonce mismatch");
            return Ok(false);
        }
        if proof.credential.subject_did != proof.holder_did
            || keys::did_for_verkey(&proof.holder_verkey).as_deref()
                != Some(proof.holder_did.as_str())
        {
            return Ok(false);
        }
        if !Self::check_credential(&proof.credential)? {
            return Ok(false);
        }
        let payload = proof.signing_payload()?;
        let valid = keys::verify(&proof.holder_verkey, &payload, &proof.signature);
        tracing::debug!(credential_id = %proof.credential.id, valid, "proof verified");
        Ok(valid)
    }
}

/// Holder-prover agent keeping master secrets and credentials in memory.
pub struct LocalHolderProver {
    base: LocalAgent,
    master_secret: Mutex<Option<String>>,
    credentials: DashMap<String, Credential>,
}

impl LocalHolderProver {
    pub fn new(pool: Arc<LocalPool>, wallet: WalletConfig) -> Self {
        Self {
            base: LocalAgent::new(pool, wallet),
            master_secret: Mutex::new(None),
            credentials: DashMap::new(),
        }
    }

    /// Id of the current master secret, if one was created.
    pub fn master_secret_id(&self) -> Option<String> {
        self.master_secret
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Number of stored credentials.
    pub fn credential_count(&self) -> usize {
        self.credentials.len()
    }

    fn sign_proof(key: &DerivedKey, credential: Credential, nonce: &str) -> Result<Proof, SdkError> {
        let mut proof = Proof {
            credential,
            holder_did: key.did.clone(),
            holder_verkey: key.verkey.clone(),
            nonce: nonce.to_string(),
            signature: String::new(),
        };
        let payload = proof.signing_payload()?;
        proof.signature = key.sign(&payload);
        Ok(proof)
    }
}

role_agent!(LocalHolderProver);

#[async_trait]
impl HolderProver for LocalHolderProver {
    async fn create_master_secret(&self, id: &str) -> Result<(), SdkError> {
        self.base.with_key(|_| ())?;
        let mut slot = self.master_secret.lock().unwrap_or_else(|e| e.into_inner());
        if slot.as_deref() == Some(id) {
            return Err(SdkError::MasterSecretExists(id.to_string()));
        }
        *slot = Some(id.to_string());
        tracing::debug!(wallet = %self.base.wallet_name(), master_secret = id, "master secret created");
        Ok(())
    }

    async fn store_credential(&self, credential: Credential) -> Result<String, SdkError> {
        let did = self.base.with_key(|k| k.did.clone())?;
        if credential.subject_did != did {
            return Err(SdkError::Verification(format!(
                "credential subject {} does not match holder {}",
                credential.subject_did, did
            )));
        }
        let id = credential.id.clone();
        self.credentials.insert(id.clone(), credential);
        tracing::debug!(credential_id = %id, "credential stored in wallet");
        Ok(id)
    }

    async fn create_proof(&self, credential_id: &str, nonce: &str) -> Result<Proof, SdkError> {
        if self.master_secret_id().is_none() {
            return Err(SdkError::MasterSecretMissing(
                self.base.wallet_name().to_string(),
            ));
        }
        let credential = self
            .credentials
            .get(credential_id)
            .map(|e| e.value().clone())
            .ok_or_else(|| SdkError::CredentialNotFound(credential_id.to_string()))?;
        self.base
            .with_key(|k| Self::sign_proof(k, credential, nonce))?
    }
}
