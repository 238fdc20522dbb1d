//! Integration test: issuer → holder → verifier over the virtual backend.
//!
//! Each role runs inside its own scoped block against a shared genesis file.

use std::sync::Arc;

use von_connector::{Connector, ConnectorError};
use von_core::{ConnectorConfig, WalletSeed};
use von_integration_tests::write_genesis;
use von_sdk::{Agent, HolderProver, Issuer, LocalSdk, NodePool, Verifier};

fn connector(genesis: &std::path::Path, seed: char) -> Connector<LocalSdk> {
    let mut config = ConnectorConfig {
        name: "Permitify".into(),
        ..Default::default()
    };
    config.genesis.path = Some(genesis.to_path_buf());
    Connector::with_seed(
        LocalSdk,
        config,
        WalletSeed::new(seed.to_string().repeat(32)).unwrap(),
    )
}

#[tokio::test]
async fn test_issue_hold_prove_verify() {
    let genesis = write_genesis();
    let issuing = connector(&genesis, 'i');
    let holding = connector(&genesis, 'h');
    let verifying = connector(&genesis, 'v');

    let holder_did = holding.did().await.unwrap();

    // Issuer signs a credential for the holder.
    let issuer = issuing.issuer();
    let subject = holder_did.clone();
    let credential = issuer
        .run(|agent| async move {
            let cred = agent
                .issue(
                    &subject,
                    serde_json::json!({
                        "legal_entity_id": "BC0123456",
                        "permit_type": "business licence",
                    }),
                )
                .await?;
            Ok::<_, ConnectorError>(cred)
        })
        .await
        .unwrap();
    assert_eq!(credential.issuer_did, issuing.did().await.unwrap());
    assert!(!issuer.pool().is_open());

    // Holder stores it and presents it against a verifier nonce.
    let holder = holding.holder();
    let proof = holder
        .run(|agent| async move {
            let id = agent.store_credential(credential).await?;
            let proof = agent.create_proof(&id, "nonce-42").await?;
            Ok::<_, ConnectorError>(proof)
        })
        .await
        .unwrap();
    assert_eq!(proof.holder_did, holder_did);

    // Verifier accepts the proof for the right nonce only.
    let verifier = verifying.verifier();
    let proof = Arc::new(proof);
    let checked = Arc::clone(&proof);
    let (valid, replayed) = verifier
        .run(|agent| async move {
            let valid = agent.verify_proof(&checked, "nonce-42").await?;
            let replayed = agent.verify_proof(&checked, "nonce-43").await?;
            Ok::<_, ConnectorError>((valid, replayed))
        })
        .await
        .unwrap();
    assert!(valid);
    assert!(!replayed);

    std::fs::remove_file(&genesis).ok();
}

#[tokio::test]
async fn test_role_did_matches_seed_did() {
    let genesis = write_genesis();
    let connector = connector(&genesis, 'd');
    let expected = connector.did().await.unwrap();

    let verifier = connector.verifier();
    let guard = verifier.open().await.unwrap();
    assert_eq!(guard.did(), Some(expected));
    guard.close().await.unwrap();

    std::fs::remove_file(&genesis).ok();
}

#[tokio::test]
async fn test_missing_genesis_fails_acquisition() {
    let connector = connector(std::path::Path::new("/nonexistent/genesis"), 'g');
    let issuer = connector.issuer();
    let result = issuer.open().await;
    assert!(matches!(result, Err(ConnectorError::Sdk(_))));
    assert!(!issuer.pool().is_open());
    assert!(issuer.instance().did().is_none());
}
