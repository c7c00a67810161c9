//! `/hello` and `/hi`, the latter with a follow-up for one special first name.

use chatbot_core::Result;
use dispatcher::predicates::{first_name_is, has_text, text_starts_with};
use dispatcher::{Command, DispatchContext, Reply};

pub async fn hello(ctx: DispatchContext) -> Result<()> {
    ctx.send("Hello world").await
}

pub async fn hi(ctx: DispatchContext) -> Result<()> {
    let text = format!("Hi, {}", ctx.user().first_name);
    ctx.send(&text).await
}

pub async fn nice_name(ctx: DispatchContext) -> Result<()> {
    ctx.send("Wow, nice name!").await
}

pub fn hello_command() -> Command {
    Command::new("hello", hello).with_info("says hello world")
}

pub fn hi_command() -> Command {
    Command::new("hi", hi).with_info("says hi").with_follow_up(
        Reply::new(nice_name)
            .when(has_text)
            .when(text_starts_with("/hi"))
            .when(first_name_is("Marcus")),
    )
}
