//! Storage crate: [`chatbot_core::PersistentStore`] implementations.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`sqlite_pool`] – SqlitePoolManager
//! - [`sqlite_store`] – SqliteStore (durable, used by the bot binary)
//! - [`inmemory`] – InMemoryStore (tests and offline runs)

mod error;
mod inmemory;
mod sqlite_pool;
mod sqlite_store;

pub use error::StorageError;
pub use inmemory::InMemoryStore;
pub use sqlite_pool::SqlitePoolManager;
pub use sqlite_store::SqliteStore;
