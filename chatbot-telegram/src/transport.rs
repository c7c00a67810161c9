//! Wraps teloxide::Bot and implements [`chatbot_core::Transport`]. Production code talks to the
//! Bot API; tests substitute `chatbot_core::testing::RecordingTransport`.

use std::path::Path;

use async_trait::async_trait;
use chatbot_core::{transport_error, Result, Transport};
use teloxide::net::Download;
use teloxide::prelude::*;
use teloxide::types::{ChatId, FileId, InputFile, KeyboardButton, KeyboardMarkup, ParseMode};
use tempfile::{NamedTempFile, TempPath};
use tracing::debug;

/// Thin wrapper around teloxide::Bot that implements the core Transport trait.
#[derive(Clone)]
pub struct TelegramTransport {
    bot: teloxide::Bot,
}

impl TelegramTransport {
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Transport for TelegramTransport {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat_id), text)
            .await
            .map_err(transport_error)?;
        Ok(())
    }

    async fn send_markdown(&self, chat_id: i64, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat_id), text)
            .parse_mode(ParseMode::MarkdownV2)
            .await
            .map_err(transport_error)?;
        Ok(())
    }

    async fn send_photo_by_url(&self, chat_id: i64, url: &str) -> Result<()> {
        let url = reqwest::Url::parse(url).map_err(transport_error)?;
        self.bot
            .send_photo(ChatId(chat_id), InputFile::url(url))
            .await
            .map_err(transport_error)?;
        Ok(())
    }

    async fn send_photo_by_file_id(&self, chat_id: i64, file_id: &str) -> Result<()> {
        self.bot
            .send_photo(ChatId(chat_id), InputFile::file_id(FileId(file_id.to_string())))
            .await
            .map_err(transport_error)?;
        Ok(())
    }

    async fn send_photo_by_upload(&self, chat_id: i64, path: &Path) -> Result<()> {
        self.bot
            .send_photo(ChatId(chat_id), InputFile::file(path.to_path_buf()))
            .await
            .map_err(transport_error)?;
        Ok(())
    }

    async fn resolve_file_path(&self, file_id: &str) -> Result<String> {
        let file = self
            .bot
            .get_file(FileId(file_id.to_string()))
            .await
            .map_err(transport_error)?;
        Ok(file.path)
    }

    async fn download_file(&self, remote_path: &str) -> Result<TempPath> {
        let path = NamedTempFile::new()?.into_temp_path();
        let mut dst = tokio::fs::File::create(&path).await?;
        self.bot
            .download_file(remote_path, &mut dst)
            .await
            .map_err(transport_error)?;
        debug!(remote_path = %remote_path, local_path = %path.display(), "Downloaded file");
        Ok(path)
    }

    async fn send_keyboard(&self, chat_id: i64, text: &str, rows: &[Vec<String>]) -> Result<()> {
        let keyboard: Vec<Vec<KeyboardButton>> = rows
            .iter()
            .map(|row| row.iter().map(|label| KeyboardButton::new(label.as_str())).collect())
            .collect();
        self.bot
            .send_message(ChatId(chat_id), text)
            .reply_markup(KeyboardMarkup::new(keyboard))
            .await
            .map_err(transport_error)?;
        Ok(())
    }
}
