//! `/format`: MarkdownV2 samples.

use chatbot_core::Result;
use dispatcher::{Command, DispatchContext};

/// Sent in order. Reserved MarkdownV2 characters outside entities are escaped.
pub const SAMPLES: [&str; 3] = [
    "You can make text *bold* or _italic_\\.",
    "`This is code.`",
    "```\nThis\nis\nmulti\nline\ncode.\n```",
];

pub async fn format(ctx: DispatchContext) -> Result<()> {
    for sample in SAMPLES {
        ctx.send_markdown(sample).await?;
    }
    Ok(())
}

pub fn format_command() -> Command {
    Command::new("format", format).with_info("formats the message")
}
