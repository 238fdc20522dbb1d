//! Integration test: role wrapper open/close ordering and failure handling.

use futures::FutureExt;
use std::io;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex};
use von_connector::{Connector, ConnectorError};
use von_core::{ConnectorConfig, WalletSeed};
use von_integration_tests::{BlockError, Event, Failures, RecordingSdk};
use von_sdk::{NodePool, SdkError};

fn connector(sdk: RecordingSdk) -> Connector<RecordingSdk> {
    let config = ConnectorConfig {
        name: "Permitify".into(),
        ..Default::default()
    };
    Connector::with_seed(sdk, config, WalletSeed::new("1".repeat(32)).unwrap())
}

/// Events after construction, i.e. without `PoolBuilt`.
fn lifecycle(sdk: &RecordingSdk) -> Vec<Event> {
    sdk.log
        .events()
        .into_iter()
        .filter(|e| !matches!(e, Event::PoolBuilt(_)))
        .collect()
}

// =========================================================================
// Successful scopes
// =========================================================================

#[tokio::test]
async fn test_issuer_scope_order() {
    let sdk = RecordingSdk::new();
    let connector = connector(sdk.clone());
    let issuer = connector.issuer();

    issuer
        .run(|_agent| async { Ok::<_, ConnectorError>(()) })
        .await
        .unwrap();

    assert_eq!(
        lifecycle(&sdk),
        vec![
            Event::PoolOpen("permitify-issuer".into()),
            Event::AgentOpen("Permitify Issuer Wallet".into()),
            Event::AgentClose("Permitify Issuer Wallet".into()),
            Event::PoolClose("permitify-issuer".into()),
        ]
    );
}

#[tokio::test]
async fn test_verifier_guard_order() {
    let sdk = RecordingSdk::new();
    let connector = connector(sdk.clone());
    let verifier = connector.verifier();

    let guard = verifier.open().await.unwrap();
    assert!(guard.is_open());
    guard.close().await.unwrap();

    assert_eq!(
        lifecycle(&sdk),
        vec![
            Event::PoolOpen("permitify-verifier".into()),
            Event::AgentOpen("Permitify Verifier Wallet".into()),
            Event::AgentClose("Permitify Verifier Wallet".into()),
            Event::PoolClose("permitify-verifier".into()),
        ]
    );
}

#[tokio::test]
async fn test_holder_scope_creates_master_secret() {
    let sdk = RecordingSdk::new();
    let connector = connector(sdk.clone());
    let holder = connector.holder();

    holder
        .run(|_agent| async { Ok::<_, ConnectorError>(()) })
        .await
        .unwrap();

    let events = lifecycle(&sdk);
    assert_eq!(events.len(), 5);
    assert_eq!(events[0], Event::PoolOpen("permitify-holder".into()));
    assert_eq!(events[1], Event::AgentOpen("Permitify Holder Wallet".into()));
    assert!(matches!(events[2], Event::MasterSecret(_)));
    assert_eq!(events[3], Event::AgentClose("Permitify Holder Wallet".into()));
    assert_eq!(events[4], Event::PoolClose("permitify-holder".into()));
}

#[tokio::test]
async fn test_holder_master_secret_fresh_per_acquisition() {
    let sdk = RecordingSdk::new();
    let connector = connector(sdk.clone());
    let holder = connector.holder();

    for _ in 0..3 {
        let guard = holder.open().await.unwrap();
        guard.close().await.unwrap();
    }

    let secrets = sdk.log.master_secrets();
    assert_eq!(secrets.len(), 3);
    assert_ne!(secrets[0], secrets[1]);
    assert_ne!(secrets[1], secrets[2]);
    assert_ne!(secrets[0], secrets[2]);
}

#[tokio::test]
async fn test_role_wallet_configuration() {
    let sdk = RecordingSdk::new();
    let connector = connector(sdk.clone());
    let issuer = connector.issuer();
    let wallet = issuer.instance().wallet();

    assert_eq!(wallet.pool_name, "permitify-issuer");
    assert_eq!(wallet.wallet_type.as_deref(), Some("virtual"));
    assert_eq!(wallet.config.freshness_time, 0);
    assert_eq!(wallet.credentials.key, "");
    assert_eq!(wallet.seed.as_str(), "1".repeat(32));
}

#[tokio::test]
async fn test_configured_wallet_settings_reach_wallet() {
    let sdk = RecordingSdk::new();
    let mut config = ConnectorConfig {
        name: "Permitify".into(),
        ..Default::default()
    };
    config.wallet.wallet_type = "postgres".into();
    config.wallet.freshness_time = 600;
    config.wallet.key = "wallet-key".into();
    let connector = Connector::with_seed(sdk, config, WalletSeed::new("1".repeat(32)).unwrap());
    let holder = connector.holder();
    let wallet = holder.instance().wallet();

    assert_eq!(wallet.wallet_type.as_deref(), Some("postgres"));
    assert_eq!(wallet.config.freshness_time, 600);
    assert_eq!(wallet.credentials.key, "wallet-key");
}

#[tokio::test]
async fn test_construction_opens_nothing() {
    let sdk = RecordingSdk::new();
    let connector = connector(sdk.clone());
    let _issuer = connector.issuer();
    let _verifier = connector.verifier();
    let _holder = connector.holder();

    assert_eq!(
        sdk.log.events(),
        vec![
            Event::PoolBuilt("permitify-issuer".into()),
            Event::PoolBuilt("permitify-verifier".into()),
            Event::PoolBuilt("permitify-holder".into()),
        ]
    );
}

#[tokio::test]
async fn test_dropped_guard_teardown_finishes_before_reopen() {
    let sdk = RecordingSdk::new();
    let connector = connector(sdk.clone());
    let issuer = connector.issuer();

    drop(issuer.open().await.unwrap());
    let guard = issuer.open().await.unwrap();
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }

    assert!(issuer.pool().is_open());
    assert!(guard.is_open());
    assert_eq!(
        lifecycle(&sdk),
        vec![
            Event::PoolOpen("permitify-issuer".into()),
            Event::AgentOpen("Permitify Issuer Wallet".into()),
            Event::AgentClose("Permitify Issuer Wallet".into()),
            Event::PoolClose("permitify-issuer".into()),
            Event::PoolOpen("permitify-issuer".into()),
            Event::AgentOpen("Permitify Issuer Wallet".into()),
        ]
    );
    guard.close().await.unwrap();
}

// =========================================================================
// Failures inside the scope
// =========================================================================

/// In-memory sink for formatted log output.
#[derive(Clone, Default)]
struct LogBuf(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_block_error_is_logged() {
    let buf = LogBuf::default();
    let writer = buf.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_max_level(tracing::Level::ERROR)
        .with_writer(move || writer.clone())
        .finish();
    let _default = tracing::subscriber::set_default(subscriber);

    let sdk = RecordingSdk::new();
    let connector = connector(sdk.clone());
    let issuer = connector.issuer();
    let result: Result<(), BlockError> = issuer
        .run(|_agent| async { Err(BlockError::Failed("ledger said no".into())) })
        .await;
    assert!(result.is_err());

    let output = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
    assert!(output.contains("ERROR"), "{output}");
    assert!(output.contains("error inside role scope"), "{output}");
    assert!(output.contains("block failed: ledger said no"), "{output}");
    assert!(output.contains("role=issuer"), "{output}");
}

#[tokio::test]
async fn test_block_error_propagates_after_teardown() {
    let sdk = RecordingSdk::new();
    let connector = connector(sdk.clone());
    let issuer = connector.issuer();

    let result: Result<(), BlockError> = issuer
        .run(|_agent| async { Err(BlockError::Failed("boom".into())) })
        .await;

    match result {
        Err(BlockError::Failed(msg)) => assert_eq!(msg, "boom"),
        other => panic!("expected the block's own error, got {other:?}"),
    }

    let events = lifecycle(&sdk);
    let closes = events
        .iter()
        .filter(|e| matches!(e, Event::AgentClose(_) | Event::PoolClose(_)))
        .count();
    assert_eq!(closes, 2);
    assert_eq!(events.last(), Some(&Event::PoolClose("permitify-issuer".into())));
}

#[tokio::test]
async fn test_block_panic_resumes_after_teardown() {
    let sdk = RecordingSdk::new();
    let connector = connector(sdk.clone());
    let verifier = connector.verifier();

    let outcome = AssertUnwindSafe(verifier.run(|_agent| async {
        if true {
            panic!("inside scope");
        }
        Ok::<(), ConnectorError>(())
    }))
    .catch_unwind()
    .await;

    assert!(outcome.is_err());
    assert_eq!(
        lifecycle(&sdk),
        vec![
            Event::PoolOpen("permitify-verifier".into()),
            Event::AgentOpen("Permitify Verifier Wallet".into()),
            Event::AgentClose("Permitify Verifier Wallet".into()),
            Event::PoolClose("permitify-verifier".into()),
        ]
    );
}

// =========================================================================
// Failures while acquiring
// =========================================================================

#[tokio::test]
async fn test_pool_open_failure_propagates() {
    let sdk = RecordingSdk::with_failures(Failures {
        pool_open: true,
        ..Default::default()
    });
    let connector = connector(sdk.clone());
    let issuer = connector.issuer();

    let result = issuer.open().await;
    assert!(matches!(
        result,
        Err(ConnectorError::Sdk(SdkError::Genesis(_)))
    ));
    assert!(lifecycle(&sdk).is_empty());
}

#[tokio::test]
async fn test_agent_open_failure_closes_pool() {
    let sdk = RecordingSdk::with_failures(Failures {
        agent_open: true,
        ..Default::default()
    });
    let connector = connector(sdk.clone());
    let verifier = connector.verifier();

    let result: Result<(), ConnectorError> =
        verifier.run(|_agent| async { Ok(()) }).await;
    assert!(matches!(result, Err(ConnectorError::Sdk(SdkError::NotOpen(_)))));
    assert_eq!(
        lifecycle(&sdk),
        vec![
            Event::PoolOpen("permitify-verifier".into()),
            Event::PoolClose("permitify-verifier".into()),
        ]
    );
}

#[tokio::test]
async fn test_master_secret_failure_closes_agent_and_pool() {
    let sdk = RecordingSdk::with_failures(Failures {
        master_secret: true,
        ..Default::default()
    });
    let connector = connector(sdk.clone());
    let holder = connector.holder();

    let result = holder.open().await;
    assert!(matches!(
        result,
        Err(ConnectorError::Sdk(SdkError::MasterSecretExists(_)))
    ));
    assert_eq!(
        lifecycle(&sdk),
        vec![
            Event::PoolOpen("permitify-holder".into()),
            Event::AgentOpen("Permitify Holder Wallet".into()),
            Event::AgentClose("Permitify Holder Wallet".into()),
            Event::PoolClose("permitify-holder".into()),
        ]
    );
}
