//! # chatbot-core
//!
//! Core types and traits for the chat bot: [`Update`], [`Transport`], [`PersistentStore`],
//! error types and tracing initialization. Platform-agnostic; used by dispatcher, storage and
//! chatbot-telegram.

pub mod error;
pub mod logger;
pub mod store;
pub mod transport;
pub mod types;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::{ChatbotError, HandlerError, Result, ACCESS_DENIED_MESSAGE, APOLOGY_MESSAGE};
pub use logger::init_tracing;
pub use store::{ComputeFn, PersistentStore, ADMINS, COUNTERS, USERS};
pub use transport::{transport_error, Transport};
pub use types::{Chat, ChatKind, PhotoSize, Update, User};
