mod common;

use std::sync::Arc;

use common::{ALICE_KEY, BOB_KEY, SECRET, account, settings};
use link_gate::application::services::AccessGate;
use link_gate::domain::entities::Role;
use link_gate::domain::errors::AuthError;
use link_gate::infrastructure::memory::{MemoryIdentityRepository, MemoryQuotaRepository};
use link_gate::utils::api_key::hash_api_key;

type Gate = AccessGate<MemoryIdentityRepository, MemoryQuotaRepository>;

fn gate(anonymous_enabled: bool, default_quota: i64) -> Arc<Gate> {
    let identities = Arc::new(MemoryIdentityRepository::new());
    identities.insert(account(2, "alice", ALICE_KEY, Role::Default));
    identities.insert(account(3, "bob", BOB_KEY, Role::Default));

    Arc::new(AccessGate::new(
        identities,
        Arc::new(MemoryQuotaRepository::new()),
        settings(anonymous_enabled, default_quota),
    ))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_calls_never_exceed_quota() {
    let quota = 5;
    let gate = gate(false, quota);

    let mut handles = Vec::new();
    for _ in 0..40 {
        let gate = Arc::clone(&gate);
        handles.push(tokio::spawn(async move {
            gate.authenticate(Some(ALICE_KEY), "127.0.0.1").await
        }));
    }

    let mut allowed = 0;
    let mut rejected = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(identity) => {
                assert_eq!(identity.subject(), "alice");
                allowed += 1;
            }
            Err(AuthError::QuotaExceeded) => rejected += 1,
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    assert_eq!(allowed, quota);
    assert_eq!(rejected, 40 - quota);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_subjects_do_not_share_quota() {
    let gate = gate(true, 3);

    let mut handles = Vec::new();
    for i in 0..30 {
        let gate = Arc::clone(&gate);
        let credential = match i % 3 {
            0 => Some(ALICE_KEY),
            1 => Some(BOB_KEY),
            _ => None,
        };
        handles.push(tokio::spawn(async move {
            gate.authenticate(credential, "192.0.2.1")
                .await
                .map(|identity| identity.subject().to_string())
        }));
    }

    let mut per_subject = std::collections::HashMap::<String, usize>::new();
    for handle in handles {
        if let Ok(subject) = handle.await.unwrap() {
            *per_subject.entry(subject).or_default() += 1;
        }
    }

    assert_eq!(per_subject.get("alice"), Some(&3));
    assert_eq!(per_subject.get("bob"), Some(&3));
    assert_eq!(per_subject.get("ANONIP-192.0.2.1"), Some(&3));
}

#[tokio::test]
async fn test_key_hash_is_keyed_by_secret() {
    let gate = gate(false, 10);

    // A record hashed with another secret must not match.
    let identities = Arc::new(MemoryIdentityRepository::new());
    let mut stale = account(9, "mallory", "malloryskey0000000001", Role::Admin);
    stale.api_key_hash = Some(hash_api_key("other-secret", "malloryskey0000000001"));
    identities.insert(stale);
    let other_gate: Gate = AccessGate::new(
        identities,
        Arc::new(MemoryQuotaRepository::new()),
        settings(false, 10),
    );

    assert_eq!(
        other_gate
            .authenticate(Some("malloryskey0000000001"), "127.0.0.1")
            .await
            .unwrap_err(),
        AuthError::InvalidCredential
    );
    assert!(gate.authenticate(Some(ALICE_KEY), "127.0.0.1").await.is_ok());
    assert_ne!(hash_api_key(SECRET, ALICE_KEY), hash_api_key("other-secret", ALICE_KEY));
}
