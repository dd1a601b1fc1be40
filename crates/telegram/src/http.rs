use std::time::Duration;

use async_trait::async_trait;
use eyre::{Result, WrapErr, bail};
use framed_core::notify::{NotificationEvent, Notifier};
use serde::Deserialize;

/// Envelope every Bot API method answers with.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    description: Option<String>,
}

/// Posts alerts straight to the Bot API `sendMessage` method.
#[derive(Debug, Clone)]
pub struct HttpNotifier {
    client: reqwest::Client,
    api_url: String,
    bot_token: String,
    chat_id: i64,
}

impl HttpNotifier {
    pub fn new(api_url: &str, bot_token: &str, chat_id: i64, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .wrap_err("Failed to build Telegram HTTP client")?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            bot_token: bot_token.to_string(),
            chat_id,
        })
    }

    fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_url, self.bot_token)
    }
}

#[async_trait]
impl Notifier for HttpNotifier {
    async fn notify(&self, event: NotificationEvent) -> Result<()> {
        let params = [
            ("chat_id", self.chat_id.to_string()),
            ("text", event.to_markdown()),
            ("parse_mode", "MarkdownV2".to_string()),
        ];

        let response = self
            .client
            .post(self.send_message_url())
            .form(&params)
            .send()
            .await
            .wrap_err("Telegram request failed")?;

        let status = response.status();
        let body: ApiResponse = response
            .json()
            .await
            .wrap_err_with(|| format!("Unreadable Telegram response (HTTP {})", status))?;

        if !body.ok {
            bail!(
                "Telegram rejected the message (HTTP {}): {}",
                status,
                body.description.unwrap_or_default()
            );
        }

        tracing::debug!("Telegram alert delivered: kind={}", event.kind());
        Ok(())
    }
}
