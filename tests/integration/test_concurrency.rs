use std::sync::Arc;
use std::time::Duration;

use mock_security_realm::{MockSecurityRealm, RealmConfig, RealmError, SecurityRealm, StdEntropy};
use tokio::time::Instant;

use crate::test_utils::ROSTER;

fn delayed_realm(delay_millis: i64, random_delay: bool) -> Arc<MockSecurityRealm> {
    let config = RealmConfig::builder()
        .with_data(ROSTER)
        .with_delay_millis(delay_millis)
        .with_random_delay(random_delay)
        .build();
    Arc::new(MockSecurityRealm::with_entropy(config, Arc::new(StdEntropy::seeded(1))))
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_lookups_sleep_independently() {
    let realm = delayed_realm(100, true);

    let start = Instant::now();
    let handles: Vec<_> = (0..50)
        .map(|i| {
            let realm = Arc::clone(&realm);
            tokio::spawn(async move {
                let user = ["alice", "bob", "charlie", "debbie"][i % 4];
                realm.authenticate(user, user).await.map(|u| u.username().to_string())
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap().is_ok());
    }

    // jitter keeps every delay within [90, 110) ms; sleeping callers never
    // wait on each other
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(90), "elapsed {:?}", elapsed);
    assert!(elapsed < Duration::from_millis(200), "elapsed {:?}", elapsed);
}

#[tokio::test(start_paused = true)]
async fn test_outage_applies_to_calls_arriving_after_toggle() {
    let realm = delayed_realm(1_000, false);

    let in_flight = {
        let realm = Arc::clone(&realm);
        tokio::spawn(async move { realm.load_user_by_username("bob").await })
    };
    // let the in-flight call pass the outage check and start sleeping
    tokio::task::yield_now().await;

    realm.set_outage(true);
    assert_eq!(
        realm.load_group_by_groupname("dev", true).await,
        Err(RealmError::BackendUnavailable)
    );

    // the call admitted before the outage still completes
    assert_eq!(in_flight.await.unwrap().unwrap().username(), "bob");

    realm.set_outage(false);
    assert!(realm.load_group_by_groupname("dev", true).await.is_ok());
}

#[test]
fn test_realm_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<MockSecurityRealm>();
    assert_send_sync::<Arc<dyn SecurityRealm>>();
}
