//! Replies: actions triggered by properties of an update rather than an explicit command.

use std::fmt;
use std::sync::Arc;

use chatbot_core::Update;

use crate::command::Action;

/// Pure test over an update. Must not have side effects.
pub type Predicate = Arc<dyn Fn(&Update) -> bool + Send + Sync>;

/// Conditional continuation. All predicates must hold (logical AND); a reply without
/// predicates matches every update.
#[derive(Clone)]
pub struct Reply {
    predicates: Vec<Predicate>,
    action: Arc<dyn Action>,
}

impl Reply {
    pub fn new(action: impl Action + 'static) -> Self {
        Self {
            predicates: Vec::new(),
            action: Arc::new(action),
        }
    }

    /// Reply firing when every predicate holds.
    pub fn of(action: impl Action + 'static, predicates: Vec<Predicate>) -> Self {
        Self {
            predicates,
            action: Arc::new(action),
        }
    }

    /// Adds one more condition.
    pub fn when(mut self, predicate: impl Fn(&Update) -> bool + Send + Sync + 'static) -> Self {
        self.predicates.push(Arc::new(predicate));
        self
    }

    pub fn is_ok_for(&self, update: &Update) -> bool {
        self.predicates.iter().all(|p| p(update))
    }

    pub(crate) fn action(&self) -> &Arc<dyn Action> {
        &self.action
    }
}

impl fmt::Debug for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reply")
            .field("predicates", &self.predicates.len())
            .finish()
    }
}

/// Common predicates.
pub mod predicates {
    use chatbot_core::Update;

    pub fn has_text(update: &Update) -> bool {
        update.has_text()
    }

    pub fn has_photo(update: &Update) -> bool {
        update.has_photo()
    }

    pub fn text_starts_with(prefix: impl Into<String>) -> impl Fn(&Update) -> bool + Send + Sync {
        let prefix = prefix.into();
        move |update| {
            update
                .text
                .as_deref()
                .is_some_and(|text| text.starts_with(prefix.as_str()))
        }
    }

    /// Sender's first name equals `name`, ignoring case.
    pub fn first_name_is(name: impl Into<String>) -> impl Fn(&Update) -> bool + Send + Sync {
        let name = name.into();
        move |update| update.user.first_name.eq_ignore_ascii_case(&name)
    }
}

#[cfg(test)]
mod tests {
    use super::predicates::*;
    use super::*;
    use crate::context::DispatchContext;
    use chatbot_core::testing::{test_user, text_update};
    use chatbot_core::Result;

    async fn noop(_ctx: DispatchContext) -> Result<()> {
        Ok(())
    }

    #[test]
    fn test_predicates_are_anded() {
        let reply = Reply::new(noop)
            .when(has_text)
            .when(text_starts_with("/hi"))
            .when(first_name_is("marcus"));

        let marcus = test_user(1, "Marcus");
        let other = test_user(2, "Anna");
        assert!(reply.is_ok_for(&text_update(&marcus, "/hi there")));
        assert!(!reply.is_ok_for(&text_update(&marcus, "/hello")));
        assert!(!reply.is_ok_for(&text_update(&other, "/hi")));
    }

    #[test]
    fn test_reply_without_predicates_matches_everything() {
        let reply = Reply::of(noop, Vec::new());
        assert!(reply.is_ok_for(&text_update(&test_user(1, "Foo"), "anything")));
    }

    #[test]
    fn test_has_photo() {
        let update = text_update(&test_user(1, "Foo"), "no photo");
        assert!(!has_photo(&update));
        assert!(has_text(&update));
    }
}
