//! Integration tests for the target registry
//!
//! Verifies the set invariants (no duplicates, only added-and-not-removed
//! URLs, insertion order), the error taxonomy, persistence through the JSON
//! store, and startup restore.

use std::time::Duration;

use pretty_assertions::assert_eq;
use uptime_monitoring::persistence::JsonFileStore;
use uptime_monitoring::registry::RegistryError;

mod helpers;
use helpers::*;

/// Interval long enough that only the immediate probe on add fires
const IDLE: Duration = Duration::from_secs(60);

// unreachable but parseable targets; probe outcomes are irrelevant here
const URL_A: &str = "http://127.0.0.1:9/a";
const URL_B: &str = "http://127.0.0.2:9/b";

#[tokio::test]
async fn test_add_and_list_preserve_insertion_order() {
    let mut registry = test_registry(IDLE);

    registry.add(URL_B).await.unwrap();
    registry.add(URL_A).await.unwrap();

    assert_eq!(registry.list(), vec![URL_B.to_string(), URL_A.to_string()]);
    assert!(registry.scheduler().is_monitoring(URL_A));
    assert!(registry.scheduler().is_monitoring(URL_B));

    registry.shutdown().await;
}

#[tokio::test]
async fn test_duplicate_add_is_rejected_and_leaves_set_unchanged() {
    let mut registry = test_registry(IDLE);

    registry.add(URL_A).await.unwrap();
    let err = registry.add(URL_A).await.unwrap_err();

    assert_eq!(err, RegistryError::AlreadyExists(URL_A.to_string()));
    assert_eq!(registry.list(), vec![URL_A.to_string()]);
    assert_eq!(registry.scheduler().active_count(), 1);

    registry.shutdown().await;
}

#[tokio::test]
async fn test_invalid_urls_are_rejected() {
    let mut registry = test_registry(IDLE);

    for url in ["", "   ", "not a url", "http://", "/relative/path"] {
        let err = registry.add(url).await.unwrap_err();
        assert!(
            matches!(err, RegistryError::InvalidUrl(_)),
            "{url:?} should be invalid, got {err:?}"
        );
    }

    assert!(registry.list().is_empty());
    assert_eq!(registry.scheduler().active_count(), 0);
}

#[tokio::test]
async fn test_remove_unknown_url_is_rejected_and_leaves_set_unchanged() {
    let mut registry = test_registry(IDLE);
    registry.add(URL_A).await.unwrap();

    let err = registry.remove(URL_B).await.unwrap_err();

    assert_eq!(err, RegistryError::NotFound(URL_B.to_string()));
    assert_eq!(registry.list(), vec![URL_A.to_string()]);

    registry.shutdown().await;
}

#[tokio::test]
async fn test_remove_stops_monitoring() {
    let mut registry = test_registry(IDLE);
    registry.add(URL_A).await.unwrap();
    registry.add(URL_B).await.unwrap();

    registry.remove(URL_A).await.unwrap();

    assert_eq!(registry.list(), vec![URL_B.to_string()]);
    assert!(!registry.scheduler().is_monitoring(URL_A));
    assert!(registry.scheduler().is_monitoring(URL_B));

    registry.shutdown().await;
}

#[tokio::test]
async fn test_add_remove_sequence_upholds_set_invariants() {
    let mut registry = test_registry(IDLE);

    registry.add(URL_A).await.unwrap();
    registry.add(URL_B).await.unwrap();
    registry.remove(URL_A).await.unwrap();
    // re-adding after removal is allowed and appends at the end
    registry.add(URL_A).await.unwrap();

    let list = registry.list();
    assert_eq!(list, vec![URL_B.to_string(), URL_A.to_string()]);

    // exactly one monitor per listed target
    assert_eq!(registry.scheduler().active_count(), list.len());

    registry.shutdown().await;
}

#[tokio::test]
async fn test_snapshot_covers_every_target_in_order() {
    let mut registry = test_registry(IDLE);
    registry.add(URL_A).await.unwrap();
    registry.add(URL_B).await.unwrap();

    let snapshot = registry.snapshot_all().await;

    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot[0].url, URL_A);
    assert_eq!(snapshot[0].domain, "127.0.0.1");
    assert_eq!(snapshot[1].url, URL_B);
    assert_eq!(snapshot[1].domain, "127.0.0.2");

    registry.shutdown().await;
}

#[tokio::test]
async fn test_changes_are_persisted_to_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("endpoints.json");

    let mut registry =
        test_registry_with_store(IDLE, Box::new(JsonFileStore::new(&path)));

    registry.add(URL_A).await.unwrap();
    registry.add(URL_B).await.unwrap();

    let on_disk: Vec<String> =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(on_disk, vec![URL_A.to_string(), URL_B.to_string()]);

    registry.remove(URL_A).await.unwrap();

    let on_disk: Vec<String> =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(on_disk, vec![URL_B.to_string()]);

    registry.shutdown().await;
}

#[tokio::test]
async fn test_bootstrap_restores_persisted_targets() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("endpoints.json");
    std::fs::write(
        &path,
        serde_json::to_string(&vec![URL_A, URL_B]).unwrap(),
    )
    .unwrap();

    let mut registry =
        test_registry_with_store(IDLE, Box::new(JsonFileStore::new(&path)));
    registry.bootstrap().await;

    assert_eq!(registry.list(), vec![URL_A.to_string(), URL_B.to_string()]);
    assert_eq!(registry.scheduler().active_count(), 2);

    registry.shutdown().await;
}

#[tokio::test]
async fn test_bootstrap_skips_malformed_entries() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("endpoints.json");
    std::fs::write(
        &path,
        serde_json::to_string(&vec![URL_A, "not a url"]).unwrap(),
    )
    .unwrap();

    let mut registry =
        test_registry_with_store(IDLE, Box::new(JsonFileStore::new(&path)));
    registry.bootstrap().await;

    assert_eq!(registry.list(), vec![URL_A.to_string()]);

    registry.shutdown().await;
}

#[tokio::test]
async fn test_unreadable_store_bootstraps_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("endpoints.json");
    std::fs::write(&path, "not json").unwrap();

    let mut registry =
        test_registry_with_store(IDLE, Box::new(JsonFileStore::new(&path)));
    registry.bootstrap().await;

    assert!(registry.list().is_empty());
}
