//! Contact-form mail. [`SmtpMailer`] relays through the configured SMTP
//! server; [`LogMailer`] stands in when no relay credentials are set.

use std::time::Duration;

use async_trait::async_trait;
use eyre::{Result, WrapErr, eyre};
use framed_core::notify::{Mailer, OutgoingMail};
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::header::ContentType, transport::smtp::authentication::Credentials,
};
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::MailConfig;

const SMTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Mailer that relays through an SMTP server with STARTTLS.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

impl SmtpMailer {
    pub fn new(config: &MailConfig, username: &str, password: &str) -> Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| eyre!("SMTP relay error: {}", e))?
            .port(config.port)
            .credentials(Credentials::new(username.to_string(), password.to_string()))
            .timeout(Some(SMTP_TIMEOUT))
            .build();

        Ok(Self {
            transport,
            from: config.default_from.clone(),
        })
    }
}

/// Builds the RFC 5322 message for `mail`.
pub fn build_message(from: &str, mail: &OutgoingMail) -> Result<Message> {
    let mut builder = Message::builder()
        .from(from.parse().wrap_err("Invalid from address")?)
        .to(mail.to.parse().wrap_err("Invalid recipient address")?)
        .subject(mail.subject.as_str())
        .header(ContentType::TEXT_PLAIN);

    if let Some(reply_to) = &mail.reply_to {
        builder = builder.reply_to(reply_to.parse().wrap_err("Invalid reply-to address")?);
    }

    builder
        .body(mail.body.clone())
        .map_err(|e| eyre!("Failed to build email: {}", e))
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<()> {
        let message = build_message(&self.from, &mail)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| eyre!("Failed to send email: {}", e))?;

        info!("Contact mail sent to {}", mail.to);
        Ok(())
    }
}

/// Writes mail to the log instead of sending it.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<()> {
        info!(
            "Mail (not sent, SMTP not configured): to={} reply_to={:?} subject={:?}\n{}",
            mail.to, mail.reply_to, mail.subject, mail.body
        );
        Ok(())
    }
}

/// SMTP when credentials are configured, the log otherwise.
pub fn build_mailer(config: &MailConfig) -> Result<Arc<dyn Mailer>> {
    match config.credentials() {
        Some((username, password)) => {
            info!("Contact mail via {}:{}", config.host, config.port);
            Ok(Arc::new(SmtpMailer::new(config, username, password)?))
        }
        None => {
            warn!("EMAIL_USER/EMAIL_PASSWORD not set; contact mail is only logged");
            Ok(Arc::new(LogMailer))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_carries_reply_to() {
        let mail = OutgoingMail {
            to: "studio@example.com".to_string(),
            reply_to: Some("client@example.com".to_string()),
            subject: "New message from Anna".to_string(),
            body: "Hello!".to_string(),
        };

        let message = build_message("noreply@example.com", &mail).unwrap();
        let rendered = String::from_utf8(message.formatted()).unwrap();

        assert!(rendered.contains("Reply-To: client@example.com"));
        assert!(rendered.contains("Subject: New message from Anna"));
    }

    #[test]
    fn bad_recipient_is_an_error() {
        let mail = OutgoingMail {
            to: "not an address".to_string(),
            reply_to: None,
            subject: "x".to_string(),
            body: "x".to_string(),
        };

        assert!(build_message("noreply@example.com", &mail).is_err());
    }
}
