//! `/count`: per-user counter kept in the `COUNTERS` collection.

use chatbot_core::store::increment;
use chatbot_core::{Result, COUNTERS};
use dispatcher::{Command, DispatchContext};
use tracing::debug;

pub async fn count(ctx: DispatchContext) -> Result<()> {
    let user = ctx.user();
    let n = increment(ctx.store(), COUNTERS, &user.id.to_string()).await?;
    debug!(user_id = user.id, count = n, "Counter incremented");
    let text = format!("{}, your count is now {}!", user.short_name(), n);
    ctx.send(&text).await
}

pub fn count_command() -> Command {
    Command::new("count", count).with_info("increments a counter per user")
}
