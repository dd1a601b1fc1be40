//! Sends one test message through the configured notifier, to check the bot
//! token and chat id without creating a booking.

use color_eyre::eyre::{Result, bail};
use dotenv::dotenv;
use framed_core::notify::NotificationEvent;
use framed_telegram::{
    build_notifier,
    config::{NotifierBackend, TelegramConfig},
};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = TelegramConfig::from_env()?;
    if config.credentials().is_none() {
        bail!("TELEGRAM_BOT_API_KEY and TELEGRAM_USER_ID must be set");
    }
    let backend: NotifierBackend = std::env::var("NOTIFIER_BACKEND")
        .unwrap_or_else(|_| "http".to_string())
        .parse()?;

    let text = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "✅ Telegram alerts are working".to_string());

    let notifier = build_notifier(&config, backend)?;
    notifier.notify(NotificationEvent::Text(text)).await?;
    info!("Test message sent");

    Ok(())
}
