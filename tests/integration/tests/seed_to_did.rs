//! Integration test: deriving a DID from an arbitrary seed.

use std::path::Path;

use von_connector::{convert_seed_to_did, UTIL_POOL_NAME};
use von_integration_tests::{Event, RecordingSdk};
use von_sdk::LocalSdk;

#[tokio::test]
async fn test_wallet_named_after_seed_and_pool_untouched() {
    let sdk = RecordingSdk::new();
    let seed = "a".repeat(32);
    let wallet = format!("{seed}-wallet");

    let did = convert_seed_to_did(&sdk, Path::new("/genesis"), &seed)
        .await
        .unwrap();

    assert!(!did.is_empty());
    assert_eq!(
        sdk.log.events(),
        vec![
            Event::PoolBuilt(UTIL_POOL_NAME.into()),
            Event::AgentOpen(wallet.clone()),
            Event::AgentClose(wallet),
        ]
    );
}

#[tokio::test]
async fn test_local_sdk_dids_differ_per_seed() {
    let genesis = Path::new("/unused");
    let a = convert_seed_to_did(&LocalSdk, genesis, &"a".repeat(32))
        .await
        .unwrap();
    let b = convert_seed_to_did(&LocalSdk, genesis, &"b".repeat(32))
        .await
        .unwrap();
    assert_ne!(a, b);
    // Base58 of 16 bytes
    assert!(!a.is_empty() && a.len() <= 22);
}
