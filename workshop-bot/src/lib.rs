//! # workshop-bot
//!
//! Telegram workshop bot: greeting, counter, contacts, photo, keyboard, markdown and arithmetic
//! commands plus admin management, on top of the `dispatcher` core.

pub mod bot;
pub mod cli;
pub mod config;
pub mod handlers;
pub mod runner;

pub use bot::build_dispatcher;
pub use cli::{load_config, Cli, Commands};
pub use config::BotConfig;
pub use runner::run_bot;
