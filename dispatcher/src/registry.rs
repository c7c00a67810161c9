//! Command and reply registries. Populated at startup, read-only afterwards.

use std::collections::HashMap;

use chatbot_core::{ChatbotError, Result, Update};

use crate::command::Command;
use crate::reply::Reply;

/// Commands by name, iterated in registration order.
#[derive(Debug, Default, Clone)]
pub struct CommandRegistry {
    commands: Vec<Command>,
    by_name: HashMap<String, usize>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails with [`ChatbotError::DuplicateName`] if the name is taken.
    pub fn register(&mut self, command: Command) -> Result<()> {
        if self.by_name.contains_key(command.name()) {
            return Err(ChatbotError::DuplicateName(command.name().to_string()));
        }
        self.by_name
            .insert(command.name().to_string(), self.commands.len());
        self.commands.push(command);
        Ok(())
    }

    /// Exact, case-sensitive lookup.
    pub fn resolve(&self, name: &str) -> Option<&Command> {
        self.by_name.get(name).map(|&i| &self.commands[i])
    }

    pub fn list(&self) -> &[Command] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Replies in registration order; the first match wins.
#[derive(Debug, Default, Clone)]
pub struct ReplyRegistry {
    replies: Vec<Reply>,
}

impl ReplyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, reply: Reply) {
        self.replies.push(reply);
    }

    pub fn first_match(&self, update: &Update) -> Option<&Reply> {
        self.replies.iter().find(|reply| reply.is_ok_for(update))
    }

    pub fn len(&self) -> usize {
        self.replies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.replies.is_empty()
    }
}
