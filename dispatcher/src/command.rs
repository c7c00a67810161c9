//! Command definitions: name, info, locality, privacy, argument count, action and follow-ups.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use chatbot_core::{ChatKind, Result};

use crate::context::DispatchContext;
use crate::reply::Reply;

/// Name of the command that handles every update nothing else matched.
pub const DEFAULT_COMMAND: &str = "default";

/// Chats a command may be used in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locality {
    All,
    Group,
    Private,
}

impl Locality {
    pub fn allows(self, kind: ChatKind) -> bool {
        match self {
            Locality::All => true,
            Locality::Group => kind == ChatKind::Group,
            Locality::Private => kind == ChatKind::Private,
        }
    }
}

/// Who may use a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Privacy {
    Public,
    Admin,
    Creator,
}

/// Work performed when a command or reply fires.
///
/// Implemented for every `Fn(DispatchContext) -> impl Future<Output = Result<()>>`, so plain
/// `async fn handler(ctx: DispatchContext) -> Result<()>` items can be registered directly.
#[async_trait]
pub trait Action: Send + Sync {
    async fn run(&self, ctx: DispatchContext) -> Result<()>;
}

#[async_trait]
impl<F, Fut> Action for F
where
    F: Fn(DispatchContext) -> Fut + Send + Sync,
    Fut: Future<Output = Result<()>> + Send + 'static,
{
    async fn run(&self, ctx: DispatchContext) -> Result<()> {
        (self)(ctx).await
    }
}

/// A named command. Immutable once registered.
#[derive(Clone)]
pub struct Command {
    name: String,
    info: String,
    locality: Locality,
    privacy: Privacy,
    required_args: usize,
    action: Arc<dyn Action>,
    follow_ups: Vec<Reply>,
}

impl Command {
    /// Public command usable in every chat, taking no arguments.
    pub fn new(name: impl Into<String>, action: impl Action + 'static) -> Self {
        Self {
            name: name.into(),
            info: String::new(),
            locality: Locality::All,
            privacy: Privacy::Public,
            required_args: 0,
            action: Arc::new(action),
            follow_ups: Vec::new(),
        }
    }

    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.info = info.into();
        self
    }

    pub fn with_locality(mut self, locality: Locality) -> Self {
        self.locality = locality;
        self
    }

    pub fn with_privacy(mut self, privacy: Privacy) -> Self {
        self.privacy = privacy;
        self
    }

    /// Minimum number of whitespace-separated arguments after the command name.
    pub fn with_required_args(mut self, count: usize) -> Self {
        self.required_args = count;
        self
    }

    /// Reply evaluated against the same update after the action succeeded.
    pub fn with_follow_up(mut self, reply: Reply) -> Self {
        self.follow_ups.push(reply);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn info(&self) -> &str {
        &self.info
    }

    pub fn locality(&self) -> Locality {
        self.locality
    }

    pub fn privacy(&self) -> Privacy {
        self.privacy
    }

    pub fn required_args(&self) -> usize {
        self.required_args
    }

    pub fn follow_ups(&self) -> &[Reply] {
        &self.follow_ups
    }

    pub(crate) fn action(&self) -> &Arc<dyn Action> {
        &self.action
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("info", &self.info)
            .field("locality", &self.locality)
            .field("privacy", &self.privacy)
            .field("required_args", &self.required_args)
            .field("follow_ups", &self.follow_ups.len())
            .finish()
    }
}
