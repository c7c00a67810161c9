//! `/keyboard`: reply keyboard with shortcuts to the other commands.

use chatbot_core::Result;
use dispatcher::{Command, DispatchContext};

pub const KEYBOARD_TEXT: &str = "Enjoy this wonderful keyboard!";

pub fn rows() -> Vec<Vec<String>> {
    [["/hello", "/hi", "/count"], ["/contacts", "/logo", "/icon"]]
        .iter()
        .map(|row| row.iter().map(|label| label.to_string()).collect())
        .collect()
}

pub async fn keyboard(ctx: DispatchContext) -> Result<()> {
    ctx.transport()
        .send_keyboard(ctx.chat_id(), KEYBOARD_TEXT, &rows())
        .await
}

pub fn keyboard_command() -> Command {
    Command::new("keyboard", keyboard).with_info("send a custom keyboard")
}
