//! # chatbot-telegram
//!
//! Telegram layer: adapters, [`chatbot_core::Transport`] implementation, minimal config, REPL runner.
//! Handles only Telegram connectivity and dispatching; commands and persistence live elsewhere.

mod adapters;
mod config;
mod runner;
mod transport;

pub use adapters::{photo_sizes, TelegramMessageWrapper, TelegramUserWrapper};
pub use config::TelegramConfig;
pub use runner::run_repl;
pub use transport::TelegramTransport;
