//! Telegram delivery for booking and contact alerts.
//!
//! Two [`Notifier`] implementations share one contract: [`http::HttpNotifier`]
//! calls the Bot API directly, [`bot::BotNotifier`] goes through teloxide.
//! When credentials are missing, [`build_notifier`] hands out a
//! [`DisabledNotifier`] that only logs.

use std::sync::Arc;

use async_trait::async_trait;
use eyre::Result;
use framed_core::notify::{NotificationEvent, Notifier};
use tracing::{info, warn};

#[cfg(feature = "bot")]
pub mod bot;
pub mod config;
pub mod http;

use config::{NotifierBackend, TelegramConfig};

/// Stand-in used when the bot token or chat id is not configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledNotifier;

#[async_trait]
impl Notifier for DisabledNotifier {
    async fn notify(&self, event: NotificationEvent) -> Result<()> {
        warn!(
            "Telegram credentials not configured, skipping {} alert",
            event.kind()
        );
        Ok(())
    }
}

/// Picks the notifier for the configured backend.
///
/// # Errors
///
/// Fails only when the client cannot be constructed (e.g. a malformed API URL).
pub fn build_notifier(
    config: &TelegramConfig,
    backend: NotifierBackend,
) -> Result<Arc<dyn Notifier>> {
    let Some((token, chat_id)) = config.credentials() else {
        warn!("Telegram credentials not configured; alerts are disabled");
        return Ok(Arc::new(DisabledNotifier));
    };

    match backend {
        #[cfg(feature = "bot")]
        NotifierBackend::Bot => {
            info!("Telegram alerts via teloxide to chat {}", chat_id);
            Ok(Arc::new(bot::BotNotifier::new(
                &config.api_url,
                token,
                chat_id,
                config.timeout(),
            )?))
        }
        #[cfg(not(feature = "bot"))]
        NotifierBackend::Bot => {
            warn!("Built without the `bot` feature; falling back to the HTTP notifier");
            Ok(Arc::new(http::HttpNotifier::new(
                &config.api_url,
                token,
                chat_id,
                config.timeout(),
            )?))
        }
        NotifierBackend::Http => {
            info!("Telegram alerts via HTTP to chat {}", chat_id);
            Ok(Arc::new(http::HttpNotifier::new(
                &config.api_url,
                token,
                chat_id,
                config.timeout(),
            )?))
        }
    }
}
