//! Process entry: logging, store, transport, dispatcher, polling loop.

use std::sync::Arc;

use anyhow::{Context, Result};
use chatbot_core::init_tracing;
use chatbot_telegram::{run_repl, TelegramTransport};
use storage::SqliteStore;
use tracing::{error, info, instrument};

use crate::bot::build_dispatcher;
use crate::config::BotConfig;

/// Runs the bot until the polling loop ends, then closes the store.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(config.log_file())?;

    info!(
        bot_username = %config.bot_username(),
        database_url = %config.database_url(),
        log_file = %config.log_file(),
        "Starting workshop bot"
    );

    let store = Arc::new(SqliteStore::open(config.database_url()).await.map_err(|e| {
        error!(error = %e, database_url = %config.database_url(), "Failed to open store");
        anyhow::anyhow!("Failed to open store: {}", e)
    })?);

    let bot = config.base.telegram_config().build_bot();
    let transport = Arc::new(TelegramTransport::new(bot.clone()));

    let dispatcher = Arc::new(
        build_dispatcher(&config, transport, store.clone()).context("Invalid command setup")?,
    );

    let result = run_repl(bot, dispatcher).await;
    store.close().await;
    info!("Workshop bot stopped");
    result
}
