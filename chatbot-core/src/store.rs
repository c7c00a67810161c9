//! Persistent key-value store abstraction, partitioned into named collections.

use crate::error::{ChatbotError, Result};
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

/// Per-user counters, `user_id -> i64`.
pub const COUNTERS: &str = "COUNTERS";
/// Everyone who contacted the bot, `user_id -> User`.
pub const USERS: &str = "USERS";
/// Promoted admins, `user_id -> true`.
pub const ADMINS: &str = "ADMINS";

/// Update function for [`PersistentStore::compute_and_store`]: old value (if any) to new value.
pub type ComputeFn = Box<dyn FnOnce(Option<Value>) -> Result<Value> + Send>;

/// Key-value store used by the dispatcher and command actions.
#[async_trait]
pub trait PersistentStore: Send + Sync {
    async fn get(&self, collection: &str, key: &str) -> Result<Option<Value>>;
    async fn put(&self, collection: &str, key: &str, value: Value) -> Result<()>;
    /// Removes a key; returns whether it existed.
    async fn remove(&self, collection: &str, key: &str) -> Result<bool>;
    /// Atomic read-modify-write; concurrent callers on the same key never lose an update.
    async fn compute_and_store(&self, collection: &str, key: &str, f: ComputeFn) -> Result<Value>;
    /// All values of a collection, ordered by key.
    async fn all_values(&self, collection: &str) -> Result<Vec<Value>>;
}

/// Reads and deserializes a value.
pub async fn get_as<T: DeserializeOwned>(
    store: &dyn PersistentStore,
    collection: &str,
    key: &str,
) -> Result<Option<T>> {
    match store.get(collection, key).await? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

/// Serializes and writes a value.
pub async fn put_as<T: Serialize + Sync>(
    store: &dyn PersistentStore,
    collection: &str,
    key: &str,
    value: &T,
) -> Result<()> {
    store.put(collection, key, serde_json::to_value(value)?).await
}

/// Reads and deserializes every value of a collection.
pub async fn all_values_as<T: DeserializeOwned>(
    store: &dyn PersistentStore,
    collection: &str,
) -> Result<Vec<T>> {
    store
        .all_values(collection)
        .await?
        .into_iter()
        .map(|v| serde_json::from_value::<T>(v).map_err(ChatbotError::from))
        .collect()
}

/// Atomically increments an integer counter, starting at 1, and returns the new value.
/// A stored value that is not an integer fails with [`ChatbotError::Store`] and is left as is.
pub async fn increment(store: &dyn PersistentStore, collection: &str, key: &str) -> Result<i64> {
    let location = format!("{}/{}", collection, key);
    let value = store
        .compute_and_store(
            collection,
            key,
            Box::new(move |old| {
                let current = match old {
                    None => 0,
                    Some(v) => v.as_i64().ok_or_else(|| {
                        ChatbotError::Store(format!("counter {} is not an integer: {}", location, v))
                    })?,
                };
                Ok(Value::from(current + 1))
            }),
        )
        .await?;
    Ok(value.as_i64().unwrap_or_default())
}
