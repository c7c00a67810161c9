//! In-memory implementation of [`PersistentStore`] for tests and offline runs.

use async_trait::async_trait;
use chatbot_core::{ComputeFn, PersistentStore, Result};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

type Collections = HashMap<String, BTreeMap<String, Value>>;

/// Collections held in a map behind one lock; nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    collections: Arc<RwLock<Collections>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map(BTreeMap::len)
            .unwrap_or(0)
    }
}

#[async_trait]
impl PersistentStore for InMemoryStore {
    async fn get(&self, collection: &str, key: &str) -> Result<Option<Value>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|entries| entries.get(key))
            .cloned())
    }

    async fn put(&self, collection: &str, key: &str, value: Value) -> Result<()> {
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, collection: &str, key: &str) -> Result<bool> {
        let mut collections = self.collections.write().await;
        Ok(collections
            .get_mut(collection)
            .map(|entries| entries.remove(key).is_some())
            .unwrap_or(false))
    }

    async fn compute_and_store(&self, collection: &str, key: &str, f: ComputeFn) -> Result<Value> {
        // The write guard is held across read, compute and write.
        let mut collections = self.collections.write().await;
        let entries = collections.entry(collection.to_string()).or_default();
        let new = f(entries.get(key).cloned())?;
        entries.insert(key.to_string(), new.clone());
        Ok(new)
    }

    async fn all_values(&self, collection: &str) -> Result<Vec<Value>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|entries| entries.values().cloned().collect())
            .unwrap_or_default())
    }
}
