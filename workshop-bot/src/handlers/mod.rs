//! Workshop commands and replies. Each module exposes `*_command()` / `*_reply()` constructors
//! used by [`crate::bot::build_dispatcher`].

pub mod admin;
pub mod arithmetic;
pub mod contacts;
pub mod counter;
pub mod fallback;
pub mod format;
pub mod greeting;
pub mod keyboard;
pub mod media;
