//! Storage error types.
//!
//! Used by store implementations; converted to [`chatbot_core::ChatbotError::Store`] at the trait boundary.

use thiserror::Error;

/// Errors that can occur when using storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Corrupt value in {collection}/{key}: {reason}")]
    Corrupt {
        collection: String,
        key: String,
        reason: String,
    },
}

impl From<StorageError> for chatbot_core::ChatbotError {
    fn from(e: StorageError) -> Self {
        chatbot_core::ChatbotError::Store(e.to_string())
    }
}
