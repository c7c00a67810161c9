//! SQLite-backed [`PersistentStore`]: one `kv_entries` table keyed by (collection, key).
//!
//! Values are JSON text. `compute_and_store` runs inside a transaction behind a store-wide
//! write lock, so read-modify-write sequences from concurrent callers never interleave.

use crate::error::StorageError;
use crate::sqlite_pool::SqlitePoolManager;
use async_trait::async_trait;
use chatbot_core::{ComputeFn, PersistentStore};
use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

const UPSERT_SQL: &str = r#"
    INSERT INTO kv_entries (collection, key, value, updated_at)
    VALUES (?, ?, ?, ?)
    ON CONFLICT(collection, key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
"#;

const SELECT_SQL: &str = "SELECT value FROM kv_entries WHERE collection = ? AND key = ?";

#[derive(Clone)]
pub struct SqliteStore {
    pool_manager: SqlitePoolManager,
    write_lock: Arc<Mutex<()>>,
}

impl SqliteStore {
    /// Opens (or creates) the database and its table. `":memory:"` gives a private in-memory store.
    pub async fn open(database_url: &str) -> Result<Self, StorageError> {
        let pool_manager = SqlitePoolManager::new(database_url).await?;
        let store = Self {
            pool_manager,
            write_lock: Arc::new(Mutex::new(())),
        };
        store.init().await?;
        Ok(store)
    }

    async fn init(&self) -> Result<(), StorageError> {
        info!("Creating kv_entries table if not exist");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS kv_entries (
                collection TEXT NOT NULL,
                key TEXT NOT NULL,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                PRIMARY KEY (collection, key)
            )
            "#,
        )
        .execute(self.pool_manager.pool())
        .await?;

        Ok(())
    }

    /// Closes the pool. The store must not be used afterwards.
    pub async fn close(&self) {
        info!("Closing SQLite store");
        self.pool_manager.close().await;
    }

    fn decode(collection: &str, key: &str, raw: &str) -> Result<Value, StorageError> {
        serde_json::from_str(raw).map_err(|e| StorageError::Corrupt {
            collection: collection.to_string(),
            key: key.to_string(),
            reason: e.to_string(),
        })
    }

    pub async fn get_value(&self, collection: &str, key: &str) -> Result<Option<Value>, StorageError> {
        let row: Option<(String,)> = sqlx::query_as(SELECT_SQL)
            .bind(collection)
            .bind(key)
            .fetch_optional(self.pool_manager.pool())
            .await?;

        row.map(|(raw,)| Self::decode(collection, key, &raw)).transpose()
    }

    pub async fn put_value(&self, collection: &str, key: &str, value: &Value) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        sqlx::query(UPSERT_SQL)
            .bind(collection)
            .bind(key)
            .bind(value.to_string())
            .bind(Utc::now())
            .execute(self.pool_manager.pool())
            .await?;
        debug!(collection = %collection, key = %key, "Stored value");
        Ok(())
    }

    pub async fn remove_value(&self, collection: &str, key: &str) -> Result<bool, StorageError> {
        let _guard = self.write_lock.lock().await;
        let result = sqlx::query("DELETE FROM kv_entries WHERE collection = ? AND key = ?")
            .bind(collection)
            .bind(key)
            .execute(self.pool_manager.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn values(&self, collection: &str) -> Result<Vec<Value>, StorageError> {
        let rows: Vec<(String, String)> =
            sqlx::query_as("SELECT key, value FROM kv_entries WHERE collection = ? ORDER BY key")
                .bind(collection)
                .fetch_all(self.pool_manager.pool())
                .await?;

        rows.iter()
            .map(|(key, raw)| Self::decode(collection, key, raw))
            .collect()
    }
}

#[async_trait]
impl PersistentStore for SqliteStore {
    async fn get(&self, collection: &str, key: &str) -> chatbot_core::Result<Option<Value>> {
        Ok(self.get_value(collection, key).await?)
    }

    async fn put(&self, collection: &str, key: &str, value: Value) -> chatbot_core::Result<()> {
        Ok(self.put_value(collection, key, &value).await?)
    }

    async fn remove(&self, collection: &str, key: &str) -> chatbot_core::Result<bool> {
        Ok(self.remove_value(collection, key).await?)
    }

    #[instrument(skip(self, f))]
    async fn compute_and_store(
        &self,
        collection: &str,
        key: &str,
        f: ComputeFn,
    ) -> chatbot_core::Result<Value> {
        let _guard = self.write_lock.lock().await;
        let mut tx = self
            .pool_manager
            .pool()
            .begin()
            .await
            .map_err(StorageError::from)?;

        let row: Option<(String,)> = sqlx::query_as(SELECT_SQL)
            .bind(collection)
            .bind(key)
            .fetch_optional(&mut *tx)
            .await
            .map_err(StorageError::from)?;
        let old = row
            .map(|(raw,)| Self::decode(collection, key, &raw))
            .transpose()?;

        // An error from `f` drops `tx`, which rolls back.
        let new = f(old)?;

        sqlx::query(UPSERT_SQL)
            .bind(collection)
            .bind(key)
            .bind(new.to_string())
            .bind(Utc::now())
            .execute(&mut *tx)
            .await
            .map_err(StorageError::from)?;
        tx.commit().await.map_err(StorageError::from)?;

        debug!(collection = %collection, key = %key, value = %new, "Computed and stored value");
        Ok(new)
    }

    async fn all_values(&self, collection: &str) -> chatbot_core::Result<Vec<Value>> {
        Ok(self.values(collection).await?)
    }
}
