//! # Outbound seams
//!
//! The API server hands booking and contact events to a [`Notifier`] (chat
//! alerts, best effort) and contact-form mail to a [`Mailer`] (delivery failures
//! reach the client). Implementations live in the integration crates.

use async_trait::async_trait;
use eyre::Result;
use serde::{Deserialize, Serialize};

use crate::models::{
    booking::{Booking, ShootingCategory},
    site::ContactRequest,
    time_slot::TimeSlot,
};

/// Characters of a free-text message copied into a chat alert.
pub const ALERT_EXCERPT_LEN: usize = 200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingAlert {
    pub client_name: String,
    pub client_phone: String,
    pub client_email: String,
    pub shooting_type: ShootingCategory,
    pub time_slot: String,
    pub confirmation_code: String,
    pub message: String,
    /// Link to the public status page, when the site URL is known.
    pub status_url: Option<String>,
}

impl BookingAlert {
    pub fn new(booking: &Booking, slot: &TimeSlot) -> Self {
        Self {
            client_name: booking.client_name.clone(),
            client_phone: booking.client_phone.clone(),
            client_email: booking.client_email.clone(),
            shooting_type: booking.shooting_type,
            time_slot: slot.label(),
            confirmation_code: booking.confirmation_code.clone(),
            message: booking.message.clone(),
            status_url: None,
        }
    }

    pub fn with_status_url(mut self, base_url: Option<&str>) -> Self {
        self.status_url =
            base_url.map(|base| format!("{}/api/bookings/{}", base, self.confirmation_code));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactAlert {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl From<&ContactRequest> for ContactAlert {
    fn from(request: &ContactRequest) -> Self {
        Self {
            name: request.name.clone(),
            email: request.email.clone(),
            message: request.message.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NotificationEvent {
    BookingCreated(BookingAlert),
    ContactMessage(ContactAlert),
    /// Free-form text, e.g. a connectivity check.
    Text(String),
}

fn excerpt(text: &str) -> String {
    text.chars().take(ALERT_EXCERPT_LEN).collect()
}

/// Escapes text for Telegram MarkdownV2 outside of code spans.
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(
            c,
            '_' | '*' | '[' | ']' | '(' | ')' | '~' | '`' | '>' | '#' | '+' | '-' | '=' | '|'
                | '{' | '}' | '.' | '!' | '\\'
        ) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Inside a code span only the backtick and the backslash are special.
fn escape_code(text: &str) -> String {
    text.replace('\\', "\\\\").replace('`', "\\`")
}

impl NotificationEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            NotificationEvent::BookingCreated(_) => "booking_created",
            NotificationEvent::ContactMessage(_) => "contact_message",
            NotificationEvent::Text(_) => "text",
        }
    }

    /// Renders the alert as Telegram MarkdownV2. Every interpolated value is
    /// escaped, so client input cannot break the message.
    pub fn to_markdown(&self) -> String {
        match self {
            NotificationEvent::BookingCreated(alert) => {
                let status = alert
                    .status_url
                    .as_ref()
                    .map(|url| format!("*Status page:* {}\n", escape_markdown(url)))
                    .unwrap_or_default();
                format!(
                    "📅 *New photo session booking\\!*\n\n\
                     *Name:* {}\n\
                     *Phone:* `{}`\n\
                     *Email:* `{}`\n\
                     *Shooting type:* {}\n\
                     *Time:* {}\n\
                     *Confirmation code:* `{}`\n\
                     {}\n\
                     *Message:*\n{}",
                    escape_markdown(&alert.client_name),
                    escape_code(&alert.client_phone),
                    escape_code(&alert.client_email),
                    escape_markdown(alert.shooting_type.label()),
                    escape_markdown(&alert.time_slot),
                    escape_code(&alert.confirmation_code),
                    status,
                    escape_markdown(&excerpt(&alert.message)),
                )
            }
            NotificationEvent::ContactMessage(alert) => format!(
                "✉️ *New message from the contact form*\n\n\
                 *Name:* {}\n\
                 *Email:* `{}`\n\n\
                 *Message:*\n{}",
                escape_markdown(&alert.name),
                escape_code(&alert.email),
                escape_markdown(&excerpt(&alert.message)),
            ),
            NotificationEvent::Text(text) => escape_markdown(text),
        }
    }
}

/// Chat alert sink. Callers treat every error as advisory.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, event: NotificationEvent) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutgoingMail {
    pub to: String,
    pub reply_to: Option<String>,
    pub subject: String,
    pub body: String,
}

impl OutgoingMail {
    /// Mail forwarded to the site owner for a contact-form submission.
    pub fn contact(recipient: &str, request: &ContactRequest) -> Self {
        Self {
            to: recipient.to_string(),
            reply_to: Some(request.email.clone()),
            subject: format!("New message from {}", request.name),
            body: request.message.clone(),
        }
    }
}

/// Transactional mail delivery; errors are reported to the submitting client.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: OutgoingMail) -> Result<()>;
}
