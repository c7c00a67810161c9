//! Integration tests for [`storage::SqliteStore`].
//!
//! Covers get/put/remove, ordered `all_values`, persistence across reopen, corrupt values and
//! concurrent `compute_and_store` on a file-backed database.

use std::sync::Arc;

use chatbot_core::store::{all_values_as, increment};
use chatbot_core::{ChatbotError, PersistentStore, User};
use serde_json::json;
use storage::SqliteStore;
use tempfile::TempDir;

/// **Test: put then get returns the value; missing keys return None; remove reports existence.**
#[tokio::test]
async fn test_put_get_remove() {
    let store = SqliteStore::open(":memory:")
        .await
        .expect("Failed to open store");

    assert!(store.get("USERS", "1").await.unwrap().is_none());

    store.put("USERS", "1", json!({"id": 1})).await.unwrap();
    store.put("USERS", "1", json!({"id": 1, "again": true})).await.unwrap();
    assert_eq!(
        store.get("USERS", "1").await.unwrap(),
        Some(json!({"id": 1, "again": true}))
    );
    assert!(store.get("COUNTERS", "1").await.unwrap().is_none());

    assert!(store.remove("USERS", "1").await.unwrap());
    assert!(!store.remove("USERS", "1").await.unwrap());
}

/// **Test: all_values returns typed values of one collection ordered by key.**
#[tokio::test]
async fn test_all_values_typed() {
    let store = SqliteStore::open(":memory:").await.unwrap();
    for (id, name) in [(2, "bob"), (1, "alice")] {
        let user = User {
            id,
            username: Some(name.to_string()),
            first_name: name.to_string(),
            last_name: None,
        };
        store
            .put("USERS", &id.to_string(), serde_json::to_value(&user).unwrap())
            .await
            .unwrap();
    }
    store.put("COUNTERS", "1", json!(3)).await.unwrap();

    let users: Vec<User> = all_values_as(&store, "USERS").await.unwrap();
    let names: Vec<_> = users.iter().map(|u| u.first_name.as_str()).collect();
    assert_eq!(names, vec!["alice", "bob"]);
}

/// **Test: values survive close and reopen of a file database.**
#[tokio::test]
async fn test_persists_across_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bot.db");
    let path = path.to_str().unwrap();

    let store = SqliteStore::open(path).await.unwrap();
    assert_eq!(increment(&store, "COUNTERS", "42").await.unwrap(), 1);
    assert_eq!(increment(&store, "COUNTERS", "42").await.unwrap(), 2);
    store.close().await;

    let reopened = SqliteStore::open(path).await.unwrap();
    assert_eq!(increment(&reopened, "COUNTERS", "42").await.unwrap(), 3);
    reopened.close().await;
}

/// **Test: N concurrent increments through several pool connections add exactly N.**
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_increments_do_not_lose_updates() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("counters.db");
    let store: Arc<dyn PersistentStore> =
        Arc::new(SqliteStore::open(path.to_str().unwrap()).await.unwrap());

    let tasks: Vec<_> = (0..40)
        .map(|_| {
            let store = store.clone();
            tokio::spawn(async move { increment(store.as_ref(), "COUNTERS", "1337").await })
        })
        .collect();

    let mut seen = Vec::new();
    for task in tasks {
        seen.push(task.await.unwrap().unwrap());
    }
    seen.sort_unstable();

    assert_eq!(seen, (1..=40).collect::<Vec<i64>>());
    assert_eq!(store.get("COUNTERS", "1337").await.unwrap(), Some(json!(40)));
}

/// **Test: a failing compute function rolls back and leaves the old value.**
#[tokio::test]
async fn test_compute_error_rolls_back() {
    let store = SqliteStore::open(":memory:").await.unwrap();
    store.put("COUNTERS", "1", json!(7)).await.unwrap();

    let result = store
        .compute_and_store(
            "COUNTERS",
            "1",
            Box::new(|_| Err(ChatbotError::Store("refused".to_string()))),
        )
        .await;

    assert!(result.is_err());
    assert_eq!(store.get("COUNTERS", "1").await.unwrap(), Some(json!(7)));
}
