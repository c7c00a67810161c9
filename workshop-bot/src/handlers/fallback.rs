use chatbot_core::Result;
use dispatcher::{Command, DispatchContext, DEFAULT_COMMAND};

pub const NO_ANSWER: &str = "Sorry, I have no answer for you today.";

/// Runs for every update no reply or command handled.
pub async fn no_answer(ctx: DispatchContext) -> Result<()> {
    ctx.send(NO_ANSWER).await
}

pub fn default_command() -> Command {
    Command::new(DEFAULT_COMMAND, no_answer)
}
