use std::sync::Arc;

use mock_security_realm::{create_security_realm, MockSecurityRealm, RealmConfig, RealmError, SecurityRealm};

use crate::test_utils::{create_test_realm, write_config, ROSTER};

async fn members(realm: &dyn SecurityRealm, group: &str) -> String {
    let group = realm
        .load_group_by_groupname(group, true)
        .await
        .expect("group should resolve");
    format!("{:?}", group.members().expect("members were requested"))
}

#[tokio::test]
async fn test_realm_is_configured() {
    let file = write_config(&format!(r#"{{"data": {:?}}}"#, ROSTER));
    let realm = create_security_realm(RealmConfig::from_file(file.path()).unwrap());

    assert_eq!(members(realm.as_ref(), "admin").await, r#"{"alice", "debbie"}"#);
    assert_eq!(members(realm.as_ref(), "dev").await, r#"{"bob"}"#);
    assert_eq!(members(realm.as_ref(), "qa").await, r#"{"charlie", "debbie"}"#);

    assert_eq!(members(realm.as_ref(), "ADMIN").await, r#"{"alice", "debbie"}"#);
    assert_eq!(members(realm.as_ref(), "dEv").await, r#"{"bob"}"#);
    assert_eq!(members(realm.as_ref(), "qA").await, r#"{"charlie", "debbie"}"#);

    let alice = realm.load_user_by_username("alice").await.unwrap();
    let upper = realm.load_user_by_username("Alice").await.unwrap();
    assert_eq!(alice.username(), upper.username());
}

#[tokio::test]
async fn test_realm_is_configured_case_sensitive() {
    let file = write_config(
        r#"{
            "data": "Richard ADMIN\nalice admin\nbob Admin",
            "user_id_strategy": "case_sensitive",
            "group_id_strategy": "case_sensitive"
        }"#,
    );
    let realm = create_security_realm(RealmConfig::from_file(file.path()).unwrap());

    assert_eq!(members(realm.as_ref(), "ADMIN").await, r#"{"Richard"}"#);
    assert!(matches!(
        realm.load_user_by_username("richard").await,
        Err(RealmError::UnknownIdentity(_))
    ));
}

#[tokio::test]
async fn test_authentication_outcomes_are_distinguishable() {
    let realm = create_test_realm("alice/wonder admin\nbob dev");

    assert!(realm.authenticate("alice", "wonder").await.is_ok());
    assert!(realm.authenticate("bob", "bob").await.is_ok());

    let bad = realm.authenticate("alice", "alice").await.unwrap_err();
    assert_eq!(bad, RealmError::BadCredentials("alice".to_string()));
    assert!(bad.is_authentication_failure());

    let unknown = realm.authenticate("eve", "eve").await.unwrap_err();
    assert_eq!(unknown, RealmError::UnknownIdentity("eve".to_string()));
    assert!(unknown.is_authentication_failure());
    assert_ne!(bad, unknown);
}

#[tokio::test]
async fn test_resolved_groups_match_group_members() {
    let realm = create_test_realm(ROSTER);

    for user in ["alice", "bob", "charlie", "debbie"] {
        let details = realm.load_user_by_username(user).await.unwrap();
        for group in ["admin", "dev", "qa"] {
            let group_details = realm.load_group_by_groupname(group, true).await.unwrap();
            let listed = group_details.members().unwrap().contains(user);
            assert_eq!(details.has_authority(group), listed, "{} / {}", user, group);
        }
        assert!(details.has_authority("authenticated"));
    }
}

#[tokio::test]
async fn test_unknown_lookups() {
    let realm = create_test_realm(ROSTER);

    assert_eq!(
        realm.load_user_by_username("nonexistent").await,
        Err(RealmError::UnknownIdentity("nonexistent".to_string()))
    );
    assert_eq!(
        realm.load_group_by_groupname("nonexistent", true).await,
        Err(RealmError::UnknownGroup("nonexistent".to_string()))
    );
}

#[tokio::test]
async fn test_outage_is_indeterminate_and_reversible() {
    let realm = Arc::new(MockSecurityRealm::new(RealmConfig::new(ROSTER)));
    let framework: Arc<dyn SecurityRealm> = realm.clone();

    realm.set_outage(true);
    for result in [
        framework.authenticate("alice", "alice").await.map(|_| ()),
        framework.load_user_by_username("alice").await.map(|_| ()),
        framework.load_group_by_groupname("admin", false).await.map(|_| ()),
    ] {
        let err = result.unwrap_err();
        assert_eq!(err, RealmError::BackendUnavailable);
        assert!(err.is_indeterminate());
        assert!(!err.is_authentication_failure());
    }

    realm.set_outage(false);
    assert_eq!(framework.authenticate("alice", "alice").await.unwrap().username(), "alice");
}

#[tokio::test]
async fn test_repeated_lookups_are_identical() {
    let realm = create_test_realm(ROSTER);

    let first = realm.load_group_by_groupname("qa", true).await.unwrap();
    let second = realm.load_group_by_groupname("qa", true).await.unwrap();
    assert_eq!(first, second);

    let first = realm.load_user_by_username("debbie").await.unwrap();
    let second = realm.load_user_by_username("debbie").await.unwrap();
    assert_eq!(first, second);
}
