//! REPL runner: converts teloxide messages to core updates and passes them to the Dispatcher.
//! teloxide delivers updates of one chat in order; each update is dispatched to completion before
//! the next one from that chat is taken.

use std::sync::Arc;

use anyhow::Result;
use dispatcher::Dispatcher;
use teloxide::prelude::*;
use tracing::{info, instrument, warn};

use crate::adapters::TelegramMessageWrapper;

/// Starts the REPL with the given teloxide Bot and Dispatcher. Returns when the bot is stopped.
#[instrument(skip(bot, dispatcher))]
pub async fn run_repl(bot: teloxide::Bot, dispatcher: Arc<Dispatcher>) -> Result<()> {
    match bot.get_me().await {
        Ok(me) => {
            if let Some(username) = &me.user.username {
                info!(username = %username, "Bot connected");
            }
        }
        Err(e) => warn!(error = %e, "get_me failed; continuing"),
    }

    teloxide::repl(bot, move |msg: Message| {
        let dispatcher = dispatcher.clone();

        async move {
            let Some(update) = TelegramMessageWrapper(&msg).to_core() else {
                info!(chat_id = msg.chat.id.0, "Ignoring message without sender");
                return respond(());
            };

            match update.text.as_deref() {
                Some(text) => info!(
                    user_id = update.user.id,
                    chat_id = update.chat.id,
                    message_content = %text,
                    "Received message"
                ),
                None => info!(
                    user_id = update.user.id,
                    chat_id = update.chat.id,
                    photos = update.photos.len(),
                    "Received non-text message"
                ),
            }

            dispatcher.dispatch(update).await;
            respond(())
        }
    })
    .await;

    Ok(())
}
