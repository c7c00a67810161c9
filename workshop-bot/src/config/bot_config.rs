//! BotConfig: BaseConfig + WorkshopConfig. Use load() for env-based loading.

use anyhow::Result;

use super::{BaseConfig, WorkshopConfig};

/// Bot config: BaseConfig + workshop settings. Use BotConfig::load() for env-based loading.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub base: BaseConfig,
    pub workshop: WorkshopConfig,
}

impl BotConfig {
    /// Load full config from environment variables. If `token` is provided it overrides BOT_TOKEN.
    /// Call validate() after load to check config before init.
    pub fn load(token: Option<String>) -> Result<Self> {
        let base = BaseConfig::load(token)?;
        let workshop = WorkshopConfig::from_env()?;
        Ok(Self { base, workshop })
    }

    /// Validate config. Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        self.workshop.validate()
    }

    pub fn bot_token(&self) -> &str {
        &self.base.bot_token
    }
    pub fn database_url(&self) -> &str {
        &self.base.database_url
    }
    pub fn log_file(&self) -> &str {
        &self.base.log_file
    }
    pub fn telegram_api_url(&self) -> Option<&str> {
        self.base.telegram_api_url.as_deref()
    }

    pub fn bot_username(&self) -> &str {
        &self.workshop.bot_username
    }
    pub fn creator_id(&self) -> i64 {
        self.workshop.creator_id
    }
    pub fn logo_url(&self) -> &str {
        &self.workshop.logo_url
    }
    pub fn icon_path(&self) -> &str {
        &self.workshop.icon_path
    }
}
