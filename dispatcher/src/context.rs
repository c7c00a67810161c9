//! Per-invocation context handed to actions.

use std::sync::Arc;

use chatbot_core::{PersistentStore, Result, Transport, Update, User};

use crate::registry::CommandRegistry;

/// Everything an action needs: the update, parsed arguments and the collaborators.
/// Created per invocation and dropped when the action returns.
#[derive(Clone)]
pub struct DispatchContext {
    update: Arc<Update>,
    args: Arc<[String]>,
    transport: Arc<dyn Transport>,
    store: Arc<dyn PersistentStore>,
    commands: Arc<CommandRegistry>,
    creator_id: i64,
}

impl DispatchContext {
    pub(crate) fn new(
        update: Arc<Update>,
        args: Vec<String>,
        transport: Arc<dyn Transport>,
        store: Arc<dyn PersistentStore>,
        commands: Arc<CommandRegistry>,
        creator_id: i64,
    ) -> Self {
        Self {
            update,
            args: args.into(),
            transport,
            store,
            commands,
            creator_id,
        }
    }

    pub fn update(&self) -> &Update {
        &self.update
    }

    pub fn user(&self) -> &User {
        &self.update.user
    }

    pub fn chat_id(&self) -> i64 {
        self.update.chat.id
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }

    pub fn first_arg(&self) -> Option<&str> {
        self.arg(0)
    }

    pub fn second_arg(&self) -> Option<&str> {
        self.arg(1)
    }

    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    pub fn store(&self) -> &dyn PersistentStore {
        self.store.as_ref()
    }

    /// Registered commands, in registration order.
    pub fn commands(&self) -> &CommandRegistry {
        &self.commands
    }

    pub fn creator_id(&self) -> i64 {
        self.creator_id
    }

    /// Sends plain text to the chat the update came from.
    pub async fn send(&self, text: &str) -> Result<()> {
        self.transport.send_text(self.chat_id(), text).await
    }

    /// Sends MarkdownV2 text to the chat the update came from.
    pub async fn send_markdown(&self, text: &str) -> Result<()> {
        self.transport.send_markdown(self.chat_id(), text).await
    }
}
