use std::{env, str::FromStr, time::Duration};

use eyre::{Result, eyre};
use serde::Deserialize;

pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// Connection settings for the Telegram Bot API.
///
/// Both the token and the chat id are optional: without them every alert is
/// skipped with a warning instead of failing the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    /// Bot token issued by @BotFather
    pub bot_token: Option<String>,
    /// Chat that receives the alerts, usually the photographer's own account
    pub chat_id: Option<i64>,
    /// Base URL of the Bot API, overridable for tests
    pub api_url: String,
    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            chat_id: None,
            api_url: DEFAULT_API_URL.to_string(),
            timeout_seconds: 10,
        }
    }
}

impl TelegramConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let bot_token = env::var("TELEGRAM_BOT_API_KEY")
            .ok()
            .filter(|token| !token.trim().is_empty());

        let chat_id = match env::var("TELEGRAM_USER_ID") {
            Ok(raw) if !raw.trim().is_empty() => Some(
                raw.trim()
                    .parse::<i64>()
                    .map_err(|_| eyre!("TELEGRAM_USER_ID must be a valid integer chat id"))?,
            ),
            _ => None,
        };

        let api_url = env::var("TELEGRAM_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let timeout_seconds = env::var("TELEGRAM_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u64>()
            .map_err(|_| eyre!("TELEGRAM_TIMEOUT_SECONDS must be a valid number"))?;

        Ok(Self {
            bot_token,
            chat_id,
            api_url,
            timeout_seconds,
        })
    }

    /// Token and chat id, when both are configured.
    pub fn credentials(&self) -> Option<(&str, i64)> {
        match (&self.bot_token, self.chat_id) {
            (Some(token), Some(chat_id)) => Some((token.as_str(), chat_id)),
            _ => None,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Which client delivers the alerts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotifierBackend {
    /// Plain HTTPS call to `sendMessage`
    #[default]
    Http,
    /// teloxide client
    Bot,
}

impl FromStr for NotifierBackend {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "http" => Ok(NotifierBackend::Http),
            "bot" => Ok(NotifierBackend::Bot),
            other => Err(eyre!("Unknown notifier backend: {} (expected http or bot)", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_need_token_and_chat() {
        let mut config = TelegramConfig::default();
        assert!(config.credentials().is_none());

        config.bot_token = Some("123:abc".to_string());
        assert!(config.credentials().is_none());

        config.chat_id = Some(42);
        assert_eq!(config.credentials(), Some(("123:abc", 42)));
    }

    #[test]
    fn backend_names() {
        assert_eq!("HTTP".parse::<NotifierBackend>().unwrap(), NotifierBackend::Http);
        assert_eq!("bot".parse::<NotifierBackend>().unwrap(), NotifierBackend::Bot);
        assert!("carrier-pigeon".parse::<NotifierBackend>().is_err());
    }
}
