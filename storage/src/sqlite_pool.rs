//! SQLite connection pool wrapper for the storage crate.

use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use tracing::info;

/// Returns true for URLs that name a private in-memory database.
pub(crate) fn is_in_memory(database_url: &str) -> bool {
    matches!(database_url, ":memory:" | "sqlite::memory:" | "sqlite://:memory:")
}

/// Manages a single SQLite pool; creates the DB file if missing.
#[derive(Clone)]
pub struct SqlitePoolManager {
    pool: SqlitePool,
}

impl SqlitePoolManager {
    /// Creates a pool for the given database path, or an in-memory database for `:memory:`.
    ///
    /// An in-memory database lives inside one connection, so that pool is capped at one
    /// connection that is never recycled.
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        info!(database_url = %database_url, "Initializing SQLite pool");

        let pool = if is_in_memory(database_url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect("sqlite::memory:")
                .await?
        } else {
            let options = SqliteConnectOptions::new()
                .create_if_missing(true)
                .filename(database_url.trim_start_matches("sqlite://"));
            SqlitePool::connect_with(options).await?
        };

        Ok(Self { pool })
    }

    /// Returns the underlying pool for running queries.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Closes every connection of the pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
