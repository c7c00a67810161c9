//! # Dispatcher
//!
//! Routes inbound updates to registered commands and replies. Replies are checked first (first
//! match wins and ends dispatch); otherwise a leading `/` selects a command by name, falling back
//! to the `default` command. Commands may carry follow-up replies evaluated after their action.

pub mod command;
pub mod context;
pub mod dispatcher;
pub mod parse;
pub mod registry;
pub mod reply;

pub use command::{Action, Command, Locality, Privacy, DEFAULT_COMMAND};
pub use context::DispatchContext;
pub use dispatcher::{DispatchOutcome, Dispatcher, DispatcherBuilder};
pub use parse::{parse_command, ParsedCommand};
pub use registry::{CommandRegistry, ReplyRegistry};
pub use reply::{predicates, Predicate, Reply};

// Integration tests live in tests/dispatcher_test.rs
