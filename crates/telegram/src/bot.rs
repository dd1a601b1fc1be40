use std::time::Duration;

use async_trait::async_trait;
use eyre::{Result, WrapErr, eyre};
use framed_core::notify::{NotificationEvent, Notifier};
use teloxide::{prelude::*, types::ParseMode};

/// Delivers alerts through the teloxide client.
#[derive(Debug, Clone)]
pub struct BotNotifier {
    bot: Bot,
    chat_id: ChatId,
    timeout: Duration,
}

impl BotNotifier {
    pub fn new(api_url: &str, bot_token: &str, chat_id: i64, timeout: Duration) -> Result<Self> {
        let api_url = url::Url::parse(api_url)
            .wrap_err_with(|| format!("Invalid Telegram API URL: {}", api_url))?;

        Ok(Self {
            bot: Bot::new(bot_token).set_api_url(api_url),
            chat_id: ChatId(chat_id),
            timeout,
        })
    }
}

#[async_trait]
impl Notifier for BotNotifier {
    async fn notify(&self, event: NotificationEvent) -> Result<()> {
        let request = self
            .bot
            .send_message(self.chat_id, event.to_markdown())
            .parse_mode(ParseMode::MarkdownV2);

        tokio::time::timeout(self.timeout, request)
            .await
            .map_err(|_| eyre!("Telegram request timed out after {:?}", self.timeout))?
            .wrap_err("Telegram rejected the message")?;

        tracing::debug!("Telegram alert delivered: kind={}", event.kind());
        Ok(())
    }
}
