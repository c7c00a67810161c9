//! `/contacts`: everyone recorded in `USERS`.

use chatbot_core::store::all_values_as;
use chatbot_core::{Result, User, USERS};
use dispatcher::{Command, DispatchContext};

pub async fn contacts(ctx: DispatchContext) -> Result<()> {
    let users: Vec<User> = all_values_as(ctx.store(), USERS).await?;
    let names = users
        .iter()
        .map(|u| u.username.as_deref().unwrap_or(&u.first_name))
        .collect::<Vec<_>>()
        .join(", ");
    let text = format!("The following users already contacted me: {}", names);
    ctx.send(&text).await
}

pub fn contacts_command() -> Command {
    Command::new("contacts", contacts).with_info("lists all users who contacted this bot")
}
