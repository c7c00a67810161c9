//! Workshop settings: bot identity, creator and media sources.

use anyhow::{Context, Result};
use std::env;

pub const DEFAULT_LOGO_URL: &str = "https://www.fihlon.ch/images/logo.png";
pub const DEFAULT_ICON_PATH: &str = "assets/chatbot.jpg";

#[derive(Debug, Clone)]
pub struct WorkshopConfig {
    /// BOT_USERNAME
    pub bot_username: String,
    /// CREATOR_ID: Telegram user id with full privileges
    pub creator_id: i64,
    /// LOGO_URL: photo sent by /logo
    pub logo_url: String,
    /// ICON_PATH: local file uploaded by /icon
    pub icon_path: String,
}

impl WorkshopConfig {
    pub fn from_env() -> Result<Self> {
        let bot_username = env::var("BOT_USERNAME").context("BOT_USERNAME not set")?;
        let creator_id = env::var("CREATOR_ID")
            .context("CREATOR_ID not set")?
            .trim()
            .parse::<i64>()
            .context("CREATOR_ID must be a numeric Telegram user id")?;
        let logo_url = env::var("LOGO_URL").unwrap_or_else(|_| DEFAULT_LOGO_URL.to_string());
        let icon_path = env::var("ICON_PATH").unwrap_or_else(|_| DEFAULT_ICON_PATH.to_string());

        Ok(Self {
            bot_username,
            creator_id,
            logo_url,
            icon_path,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.bot_username.trim().is_empty() {
            anyhow::bail!("BOT_USERNAME is empty");
        }
        if reqwest::Url::parse(&self.logo_url).is_err() {
            anyhow::bail!("LOGO_URL is not a valid URL: {}", self.logo_url);
        }
        Ok(())
    }
}
