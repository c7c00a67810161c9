//! Test doubles shared by the workspace (enabled with the `testing` feature).
//!
//! [`RecordingTransport`] keeps every outbound call in order so tests can assert on exactly what
//! the chat would have received. Failures can be switched on per operation.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tempfile::{NamedTempFile, TempPath};

use crate::error::{ChatbotError, Result};
use crate::transport::Transport;
use crate::types::{Chat, ChatKind, Update, User};

/// One recorded outbound call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Text { chat_id: i64, text: String },
    Markdown { chat_id: i64, text: String },
    PhotoUrl { chat_id: i64, url: String },
    PhotoFileId { chat_id: i64, file_id: String },
    PhotoUpload { chat_id: i64, path: PathBuf },
    Keyboard { chat_id: i64, text: String, rows: Vec<Vec<String>> },
}

/// In-memory [`Transport`] that records calls instead of talking to a platform.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<Sent>>,
    downloads: Mutex<Vec<String>>,
    fail_sends: AtomicBool,
    fail_file_resolution: AtomicBool,
    fail_downloads: AtomicBool,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every send after this call fails with a transport error.
    pub fn fail_sends(&self) {
        self.fail_sends.store(true, Ordering::SeqCst);
    }

    pub fn fail_file_resolution(&self) {
        self.fail_file_resolution.store(true, Ordering::SeqCst);
    }

    pub fn fail_downloads(&self) {
        self.fail_downloads.store(true, Ordering::SeqCst);
    }

    /// All recorded calls, oldest first.
    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    /// Text of every text, markdown and keyboard message, oldest first.
    pub fn texts(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Text { text, .. } | Sent::Markdown { text, .. } | Sent::Keyboard { text, .. } => {
                    Some(text)
                }
                _ => None,
            })
            .collect()
    }

    /// Remote paths passed to `download_file`.
    pub fn downloads(&self) -> Vec<String> {
        self.downloads.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
        self.downloads.lock().unwrap().clear();
    }

    fn record(&self, sent: Sent) -> Result<()> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(ChatbotError::Transport("send refused by test transport".to_string()));
        }
        self.sent.lock().unwrap().push(sent);
        Ok(())
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<()> {
        self.record(Sent::Text {
            chat_id,
            text: text.to_string(),
        })
    }

    async fn send_markdown(&self, chat_id: i64, text: &str) -> Result<()> {
        self.record(Sent::Markdown {
            chat_id,
            text: text.to_string(),
        })
    }

    async fn send_photo_by_url(&self, chat_id: i64, url: &str) -> Result<()> {
        self.record(Sent::PhotoUrl {
            chat_id,
            url: url.to_string(),
        })
    }

    async fn send_photo_by_file_id(&self, chat_id: i64, file_id: &str) -> Result<()> {
        self.record(Sent::PhotoFileId {
            chat_id,
            file_id: file_id.to_string(),
        })
    }

    async fn send_photo_by_upload(&self, chat_id: i64, path: &Path) -> Result<()> {
        self.record(Sent::PhotoUpload {
            chat_id,
            path: path.to_path_buf(),
        })
    }

    async fn resolve_file_path(&self, file_id: &str) -> Result<String> {
        if self.fail_file_resolution.load(Ordering::SeqCst) {
            return Err(ChatbotError::Transport(format!("file {} not found", file_id)));
        }
        Ok(format!("photos/{}.jpg", file_id))
    }

    async fn download_file(&self, remote_path: &str) -> Result<TempPath> {
        self.downloads.lock().unwrap().push(remote_path.to_string());
        if self.fail_downloads.load(Ordering::SeqCst) {
            return Err(ChatbotError::Transport(format!("download of {} failed", remote_path)));
        }
        Ok(NamedTempFile::new()?.into_temp_path())
    }

    async fn send_keyboard(&self, chat_id: i64, text: &str, rows: &[Vec<String>]) -> Result<()> {
        self.record(Sent::Keyboard {
            chat_id,
            text: text.to_string(),
            rows: rows.to_vec(),
        })
    }
}

/// A user with the given id and first name and a lowercase username.
pub fn test_user(id: i64, first_name: &str) -> User {
    User {
        id,
        username: Some(first_name.to_lowercase()),
        first_name: first_name.to_string(),
        last_name: None,
    }
}

/// A private chat whose id equals the user id, as Telegram does for direct messages.
pub fn private_chat(id: i64) -> Chat {
    Chat {
        id,
        kind: ChatKind::Private,
    }
}

pub fn group_chat(id: i64) -> Chat {
    Chat {
        id,
        kind: ChatKind::Group,
    }
}

/// Text update from `user` in their private chat.
pub fn text_update(user: &User, text: &str) -> Update {
    Update::text(format!("{}-{}", user.id, text), user.clone(), private_chat(user.id), text)
}
