//! Core types: user, chat, photo variants and the inbound [`Update`].

use serde::{Deserialize, Serialize};

/// User identity (id, username, names). Stored as-is in the `USERS` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: String,
    pub last_name: Option<String>,
}

impl User {
    /// First name, or the username when the first name is empty.
    pub fn short_name(&self) -> &str {
        if self.first_name.is_empty() {
            self.username.as_deref().unwrap_or_default()
        } else {
            &self.first_name
        }
    }
}

/// Kind of chat an update was sent from. Supergroups and channels count as groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatKind {
    Private,
    Group,
}

/// Chat identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub kind: ChatKind,
}

/// One resolution of an uploaded photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoSize {
    pub file_id: String,
    pub file_size: u32,
    /// Remote path, when the transport already knows it.
    pub file_path: Option<String>,
}

/// One inbound chat event. Immutable once received; discarded after dispatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Update {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    pub text: Option<String>,
    pub photos: Vec<PhotoSize>,
}

impl Update {
    /// Builds a text update; used by adapters and tests.
    pub fn text(id: impl Into<String>, user: User, chat: Chat, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            user,
            chat,
            text: Some(text.into()),
            photos: Vec::new(),
        }
    }

    /// Builds a photo update with the given variants and no text.
    pub fn photo(id: impl Into<String>, user: User, chat: Chat, photos: Vec<PhotoSize>) -> Self {
        Self {
            id: id.into(),
            user,
            chat,
            text: None,
            photos,
        }
    }

    pub fn has_text(&self) -> bool {
        self.text.is_some()
    }

    pub fn has_photo(&self) -> bool {
        !self.photos.is_empty()
    }

    /// Variant with the largest file size; on equal sizes the first one encountered wins.
    pub fn largest_photo(&self) -> Option<&PhotoSize> {
        self.photos.iter().fold(None, |best: Option<&PhotoSize>, photo| match best {
            Some(current) if current.file_size >= photo.file_size => Some(current),
            _ => Some(photo),
        })
    }
}
