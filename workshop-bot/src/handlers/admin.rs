//! Command listing and admin management (`/commands`, `/promote`, `/demote`).

use chatbot_core::store::{all_values_as, put_as};
use chatbot_core::{HandlerError, Result, User, ADMINS, USERS};
use dispatcher::{Command, DispatchContext, Privacy};
use tracing::info;

/// Lists `name - info` for every documented command, in registration order.
pub async fn list_commands(ctx: DispatchContext) -> Result<()> {
    let text = ctx
        .commands()
        .list()
        .iter()
        .filter(|c| !c.info().is_empty())
        .map(|c| format!("{} - {}", c.name(), c.info()))
        .collect::<Vec<_>>()
        .join("\n");
    ctx.send(&text).await
}

/// Known user whose username matches `@name` (or `name`), ignoring case.
async fn find_user(ctx: &DispatchContext) -> Result<User> {
    let wanted = ctx.first_arg().unwrap_or_default().trim_start_matches('@');
    let users: Vec<User> = all_values_as(ctx.store(), USERS).await?;
    users
        .into_iter()
        .find(|u| {
            u.username
                .as_deref()
                .is_some_and(|name| name.eq_ignore_ascii_case(wanted))
        })
        .ok_or_else(|| {
            HandlerError::InvalidArgument(format!("Sorry, I don't know @{}.", wanted)).into()
        })
}

fn display_name(user: &User) -> String {
    format!("@{}", user.username.as_deref().unwrap_or(&user.first_name))
}

pub async fn promote(ctx: DispatchContext) -> Result<()> {
    let user = find_user(&ctx).await?;
    put_as(ctx.store(), ADMINS, &user.id.to_string(), &true).await?;
    info!(user_id = user.id, by = ctx.user().id, "Promoted to admin");
    let text = format!("{} is now an admin.", display_name(&user));
    ctx.send(&text).await
}

pub async fn demote(ctx: DispatchContext) -> Result<()> {
    let user = find_user(&ctx).await?;
    let existed = ctx.store().remove(ADMINS, &user.id.to_string()).await?;
    let text = if existed {
        info!(user_id = user.id, by = ctx.user().id, "Demoted from admin");
        format!("{} is no longer an admin.", display_name(&user))
    } else {
        format!("{} was not an admin.", display_name(&user))
    };
    ctx.send(&text).await
}

pub fn commands_command() -> Command {
    Command::new("commands", list_commands).with_info("lists all commands")
}

pub fn promote_command() -> Command {
    Command::new("promote", promote)
        .with_info("makes a user an admin")
        .with_privacy(Privacy::Creator)
        .with_required_args(1)
}

pub fn demote_command() -> Command {
    Command::new("demote", demote)
        .with_info("revokes admin rights")
        .with_privacy(Privacy::Creator)
        .with_required_args(1)
}
