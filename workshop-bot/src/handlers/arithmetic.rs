//! `/add a b`.

use chatbot_core::{HandlerError, Result};
use dispatcher::{Command, DispatchContext};

fn parse_number(arg: Option<&str>) -> Result<i64> {
    let arg = arg.unwrap_or_default();
    arg.parse::<i64>().map_err(|_| {
        HandlerError::InvalidArgument(format!("Sorry, '{}' is not a whole number.", arg)).into()
    })
}

pub async fn add(ctx: DispatchContext) -> Result<()> {
    let a = parse_number(ctx.first_arg())?;
    let b = parse_number(ctx.second_arg())?;
    let sum = a.checked_add(b).ok_or_else(|| {
        HandlerError::InvalidArgument("Sorry, that sum is too large for me.".to_string())
    })?;
    let text = format!("The sum of {} and {} is {}", a, b, sum);
    ctx.send(&text).await
}

pub fn add_command() -> Command {
    Command::new("add", add)
        .with_info("adds two numbers")
        .with_required_args(2)
}
