//! Bot configuration: BaseConfig (Telegram + log + DB) + WorkshopConfig (identity and media).

mod base;
mod bot_config;
mod workshop;


pub use base::BaseConfig;
pub use bot_config::BotConfig;
pub use workshop::{WorkshopConfig, DEFAULT_ICON_PATH, DEFAULT_LOGO_URL};
