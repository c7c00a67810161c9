//! Dispatcher: resolves each update to a reply, a command or the default command and runs it.
//!
//! Order per update: record the sender in `USERS`, then reply mode (first matching reply wins and
//! ends dispatch), then command mode, then the `default` command. Action failures are reported
//! to the chat and logged; nothing escapes [`Dispatcher::dispatch`].

use std::sync::Arc;

use chatbot_core::store::{get_as, put_as};
use chatbot_core::{
    ChatbotError, PersistentStore, Transport, Update, ACCESS_DENIED_MESSAGE, ADMINS, USERS,
};
use tracing::{debug, error, info, instrument, warn};

use crate::command::{Action, Command, Privacy, DEFAULT_COMMAND};
use crate::context::DispatchContext;
use crate::parse::parse_command;
use crate::registry::{CommandRegistry, ReplyRegistry};
use crate::reply::Reply;

/// Route an update took through the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A registered reply matched and ran.
    Reply,
    /// The named command ran (its follow-ups included).
    Command(String),
    /// Nothing matched; the default command ran.
    Default,
    /// The command was found but given too few arguments.
    ArgumentCountRejected(String),
    /// The sender lacks the command's privacy level.
    AccessDenied(String),
    /// The command is not available in this kind of chat; the update was ignored.
    LocalityMismatch(String),
}

/// Collects commands and replies, then validates them into a [`Dispatcher`].
pub struct DispatcherBuilder {
    commands: CommandRegistry,
    replies: ReplyRegistry,
    transport: Arc<dyn Transport>,
    store: Arc<dyn PersistentStore>,
    creator_id: i64,
    bot_username: String,
}

impl DispatcherBuilder {
    /// Registers a command; fails with [`ChatbotError::DuplicateName`] if the name is taken.
    pub fn command(mut self, command: Command) -> chatbot_core::Result<Self> {
        self.commands.register(command)?;
        Ok(self)
    }

    pub fn reply(mut self, reply: Reply) -> Self {
        self.replies.register(reply);
        self
    }

    /// Fails with [`ChatbotError::NoDefaultRegistered`] when no `default` command was registered.
    pub fn build(self) -> chatbot_core::Result<Dispatcher> {
        if self.commands.resolve(DEFAULT_COMMAND).is_none() {
            return Err(ChatbotError::NoDefaultRegistered);
        }
        info!(
            commands = self.commands.len(),
            replies = self.replies.len(),
            creator_id = self.creator_id,
            bot_username = %self.bot_username,
            "Dispatcher built"
        );
        Ok(Dispatcher {
            commands: Arc::new(self.commands),
            replies: Arc::new(self.replies),
            transport: self.transport,
            store: self.store,
            creator_id: self.creator_id,
            bot_username: self.bot_username,
        })
    }
}

/// Routes updates to actions. Holds no mutable state; cheap to clone and share across tasks.
#[derive(Clone)]
pub struct Dispatcher {
    commands: Arc<CommandRegistry>,
    replies: Arc<ReplyRegistry>,
    transport: Arc<dyn Transport>,
    store: Arc<dyn PersistentStore>,
    creator_id: i64,
    bot_username: String,
}

impl Dispatcher {
    /// `bot_username` is the only `@suffix` accepted on commands; others fall back to `default`.
    pub fn builder(
        transport: Arc<dyn Transport>,
        store: Arc<dyn PersistentStore>,
        creator_id: i64,
        bot_username: impl Into<String>,
    ) -> DispatcherBuilder {
        DispatcherBuilder {
            commands: CommandRegistry::new(),
            replies: ReplyRegistry::new(),
            transport,
            store,
            creator_id,
            bot_username: bot_username.into(),
        }
    }

    /// Handles one update end to end.
    #[instrument(skip(self, update), fields(update_id = %update.id))]
    pub async fn dispatch(&self, update: Update) -> DispatchOutcome {
        let update = Arc::new(update);
        info!(
            user_id = update.user.id,
            chat_id = update.chat.id,
            "step: dispatch started"
        );

        self.record_user(&update).await;

        let outcome = if let Some(reply) = self.replies.first_match(&update) {
            info!(user_id = update.user.id, "step: reply matched");
            self.run(reply.action(), self.context(&update, Vec::new()), "reply")
                .await;
            DispatchOutcome::Reply
        } else {
            let parsed = update
                .text
                .as_deref()
                .and_then(|text| parse_command(text, &self.bot_username));
            match parsed {
                Some(parsed) => match self.commands.resolve(&parsed.name) {
                    Some(command) if command.name() != DEFAULT_COMMAND => {
                        self.run_command(command, &update, parsed.args).await
                    }
                    _ => {
                        debug!(command = %parsed.name, "Unknown command");
                        self.run_default(&update).await
                    }
                },
                None => self.run_default(&update).await,
            }
        };

        info!(
            user_id = update.user.id,
            chat_id = update.chat.id,
            outcome = ?outcome,
            "step: dispatch finished"
        );
        outcome
    }

    async fn run_command(
        &self,
        command: &Command,
        update: &Arc<Update>,
        args: Vec<String>,
    ) -> DispatchOutcome {
        let name = command.name().to_string();

        if !self.has_privacy(update.user.id, command.privacy()).await {
            warn!(command = %name, user_id = update.user.id, privacy = ?command.privacy(), "Access denied");
            self.notify(update.chat.id, ACCESS_DENIED_MESSAGE).await;
            return DispatchOutcome::AccessDenied(name);
        }

        if !command.locality().allows(update.chat.kind) {
            info!(command = %name, chat_kind = ?update.chat.kind, "Command not available here, ignoring");
            return DispatchOutcome::LocalityMismatch(name);
        }

        if args.len() < command.required_args() {
            let err = ChatbotError::ArgumentCount {
                command: name.clone(),
                expected: command.required_args(),
                actual: args.len(),
            };
            info!(error = %err, "Rejected command");
            self.notify(update.chat.id, &err.user_message()).await;
            return DispatchOutcome::ArgumentCountRejected(name);
        }

        info!(command = %name, user_id = update.user.id, "step: command matched");
        let ok = self
            .run(command.action(), self.context(update, args), &name)
            .await;

        if ok {
            if let Some(follow_up) = command.follow_ups().iter().find(|r| r.is_ok_for(update)) {
                info!(command = %name, "step: follow-up matched");
                self.run(follow_up.action(), self.context(update, Vec::new()), &name)
                    .await;
            }
        }

        DispatchOutcome::Command(name)
    }

    async fn run_default(&self, update: &Arc<Update>) -> DispatchOutcome {
        // `build` guarantees the default command exists.
        if let Some(command) = self.commands.resolve(DEFAULT_COMMAND) {
            self.run(command.action(), self.context(update, Vec::new()), DEFAULT_COMMAND)
                .await;
        }
        DispatchOutcome::Default
    }

    /// Runs an action and reports its error to the chat. Returns whether it succeeded.
    async fn run(&self, action: &Arc<dyn Action>, ctx: DispatchContext, route: &str) -> bool {
        let chat_id = ctx.chat_id();
        match action.run(ctx).await {
            Ok(()) => true,
            Err(e) => {
                match &e {
                    ChatbotError::Handler(_) => info!(route = %route, error = %e, "Action rejected input"),
                    _ => error!(route = %route, error = %e, "Action failed"),
                }
                self.notify(chat_id, &e.user_message()).await;
                false
            }
        }
    }

    /// Best-effort message to the chat; a failure here is only logged.
    async fn notify(&self, chat_id: i64, text: &str) {
        if let Err(e) = self.transport.send_text(chat_id, text).await {
            error!(chat_id = chat_id, error = %e, "Failed to notify chat");
        }
    }

    async fn has_privacy(&self, user_id: i64, privacy: Privacy) -> bool {
        match privacy {
            Privacy::Public => true,
            Privacy::Creator => user_id == self.creator_id,
            Privacy::Admin => {
                if user_id == self.creator_id {
                    return true;
                }
                match self.store.get(ADMINS, &user_id.to_string()).await {
                    Ok(entry) => entry.is_some(),
                    Err(e) => {
                        error!(user_id = user_id, error = %e, "Failed to read admins");
                        false
                    }
                }
            }
        }
    }

    /// Upserts the sender into `USERS` when unknown or changed. Store failures are logged only.
    async fn record_user(&self, update: &Update) {
        let key = update.user.id.to_string();
        let store = self.store.as_ref();
        let known = match get_as::<chatbot_core::User>(store, USERS, &key).await {
            Ok(known) => known,
            Err(e) => {
                warn!(user_id = update.user.id, error = %e, "Failed to read user record");
                None
            }
        };
        if known.as_ref() == Some(&update.user) {
            return;
        }
        match put_as(store, USERS, &key, &update.user).await {
            Ok(()) => debug!(user_id = update.user.id, "Recorded user"),
            Err(e) => error!(user_id = update.user.id, error = %e, "Failed to record user"),
        }
    }

    fn context(&self, update: &Arc<Update>, args: Vec<String>) -> DispatchContext {
        DispatchContext::new(
            update.clone(),
            args,
            self.transport.clone(),
            self.store.clone(),
            self.commands.clone(),
            self.creator_id,
        )
    }
}
