//! Transport abstraction for outbound messages and file access.
//!
//! [`Transport`] is platform-agnostic; `chatbot-telegram` implements it via teloxide and tests
//! substitute a recording implementation.

use crate::error::{ChatbotError, Result};
use async_trait::async_trait;
use std::path::Path;
use tempfile::TempPath;

/// Outbound channel to the chat platform. Every operation may fail with [`ChatbotError::Transport`].
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends a plain text message.
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<()>;
    /// Sends a MarkdownV2 formatted message.
    async fn send_markdown(&self, chat_id: i64, text: &str) -> Result<()>;
    /// Sends a photo the platform fetches from `url`.
    async fn send_photo_by_url(&self, chat_id: i64, url: &str) -> Result<()>;
    /// Re-sends a photo already stored on the platform, without uploading it again.
    async fn send_photo_by_file_id(&self, chat_id: i64, file_id: &str) -> Result<()>;
    /// Uploads a local file as a photo.
    async fn send_photo_by_upload(&self, chat_id: i64, path: &Path) -> Result<()>;
    /// Resolves the remote download path of a file.
    async fn resolve_file_path(&self, file_id: &str) -> Result<String>;
    /// Downloads a remote file into a temporary file that is deleted when the returned path drops.
    async fn download_file(&self, remote_path: &str) -> Result<TempPath>;
    /// Sends `text` together with a reply keyboard made of `rows` of button labels.
    async fn send_keyboard(&self, chat_id: i64, text: &str, rows: &[Vec<String>]) -> Result<()>;
}

/// Wraps any displayable transport failure into [`ChatbotError::Transport`].
pub fn transport_error(e: impl std::fmt::Display) -> ChatbotError {
    ChatbotError::Transport(e.to_string())
}
