//! Error types for the bot core.
//!
//! [`ChatbotError`] is the top-level error; [`HandlerError`] is raised by command actions.

use thiserror::Error;

/// Message sent to the user when a transport or store failure interrupts an action.
pub const APOLOGY_MESSAGE: &str = "Sorry, something went wrong. Please try again later.";

/// Message sent to the user when a privileged command is used without the required level.
pub const ACCESS_DENIED_MESSAGE: &str =
    "Sorry, you don't have the required access level to do that.";

/// Top-level error for the chatbot (registration, transport, store, handler, config, IO).
#[derive(Error, Debug)]
pub enum ChatbotError {
    #[error("Command already registered: {0}")]
    DuplicateName(String),

    #[error("No default command registered")]
    NoDefaultRegistered,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Command /{command} requires {expected} argument(s), got {actual}")]
    ArgumentCount {
        command: String,
        expected: usize,
        actual: usize,
    },

    #[error("Store error: {0}")]
    Store(String),

    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors produced by command actions.
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("No photo in message")]
    NoPhoto,

    /// Bad user input; the message is shown to the user as-is.
    #[error("{0}")]
    InvalidArgument(String),
}

impl ChatbotError {
    /// Text shown to the chat when this error ends an action.
    ///
    /// Runtime errors are recovered by the dispatcher; the user only ever sees one of these.
    pub fn user_message(&self) -> String {
        match self {
            ChatbotError::ArgumentCount { expected, .. } => format!(
                "Sorry, this feature requires {} additional {}.",
                expected,
                if *expected == 1 { "input" } else { "inputs" }
            ),
            ChatbotError::Handler(HandlerError::InvalidArgument(reason)) => reason.clone(),
            _ => APOLOGY_MESSAGE.to_string(),
        }
    }
}

impl From<serde_json::Error> for ChatbotError {
    fn from(e: serde_json::Error) -> Self {
        ChatbotError::Store(e.to_string())
    }
}

/// Result type for core operations; uses [`ChatbotError`].
pub type Result<T> = std::result::Result<T, ChatbotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argument_count_user_message() {
        let err = ChatbotError::ArgumentCount {
            command: "add".to_string(),
            expected: 2,
            actual: 1,
        };
        assert_eq!(
            err.user_message(),
            "Sorry, this feature requires 2 additional inputs."
        );
        assert_eq!(err.to_string(), "Command /add requires 2 argument(s), got 1");
    }

    /// **Test: A single missing input is worded in the singular.**
    #[test]
    fn test_argument_count_user_message_singular() {
        let err = ChatbotError::ArgumentCount {
            command: "promote".to_string(),
            expected: 1,
            actual: 0,
        };
        assert_eq!(
            err.user_message(),
            "Sorry, this feature requires 1 additional input."
        );
    }

    #[test]
    fn test_transport_error_becomes_apology() {
        let err = ChatbotError::Transport("connection reset".to_string());
        assert_eq!(err.user_message(), APOLOGY_MESSAGE);
    }

    #[test]
    fn test_invalid_argument_is_shown_verbatim() {
        let err: ChatbotError =
            HandlerError::InvalidArgument("Please send whole numbers.".to_string()).into();
        assert_eq!(err.user_message(), "Please send whole numbers.");
    }
}
