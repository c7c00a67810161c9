//! Adapters from Telegram (teloxide) types to chatbot_core types.
//! Depends only on teloxide and chatbot_core type definitions.

use chatbot_core::{Chat, ChatKind, PhotoSize, Update, User};

/// Wraps a teloxide User for conversion to core [`User`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> TelegramUserWrapper<'a> {
    pub fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: self.0.first_name.clone(),
            last_name: self.0.last_name.clone(),
        }
    }
}

/// Wraps a teloxide Message for conversion to a core [`Update`].
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> TelegramMessageWrapper<'a> {
    /// Returns `None` for messages without a sender (channel posts).
    pub fn to_core(&self) -> Option<Update> {
        let msg = self.0;
        let user = TelegramUserWrapper(msg.from.as_ref()?).to_core();
        let kind = if msg.chat.is_private() {
            ChatKind::Private
        } else {
            ChatKind::Group
        };
        Some(Update {
            id: format!("{}:{}", msg.chat.id.0, msg.id.0),
            user,
            chat: Chat {
                id: msg.chat.id.0,
                kind,
            },
            text: msg.text().map(str::to_string),
            photos: msg.photo().map(photo_sizes).unwrap_or_default(),
        })
    }
}

/// Photo variants in the order Telegram sent them.
pub fn photo_sizes(photos: &[teloxide::types::PhotoSize]) -> Vec<PhotoSize> {
    photos
        .iter()
        .map(|p| PhotoSize {
            file_id: p.file.id.0.clone(),
            file_size: p.file.size,
            file_path: None,
        })
        .collect()
}
