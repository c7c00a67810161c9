//! Wires the workshop commands and replies into a [`Dispatcher`].

use std::sync::Arc;

use chatbot_core::{PersistentStore, Result, Transport};
use dispatcher::Dispatcher;
use tracing::instrument;

use crate::config::BotConfig;
use crate::handlers::{
    admin, arithmetic, contacts, counter, fallback, format, greeting, keyboard, media,
};

/// Builds the dispatcher with every workshop command, in the order `/commands` lists them.
#[instrument(skip_all, fields(creator_id = config.creator_id()))]
pub fn build_dispatcher(
    config: &BotConfig,
    transport: Arc<dyn Transport>,
    store: Arc<dyn PersistentStore>,
) -> Result<Dispatcher> {
    Dispatcher::builder(transport, store, config.creator_id(), config.bot_username())
        .command(greeting::hello_command())?
        .command(greeting::hi_command())?
        .command(counter::count_command())?
        .command(contacts::contacts_command())?
        .command(media::logo_command(config.logo_url()))?
        .command(media::icon_command(config.icon_path()))?
        .command(keyboard::keyboard_command())?
        .command(format::format_command())?
        .command(arithmetic::add_command())?
        .command(admin::commands_command())?
        .command(admin::promote_command())?
        .command(admin::demote_command())?
        .command(fallback::default_command())?
        .reply(media::photo_reply())
        .build()
}
