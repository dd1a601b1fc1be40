//! # API Configuration Module
//!
//! Loads the server settings from environment variables, with defaults where
//! a sensible one exists.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Request timeout (default: 30)
//! - `ADMIN_PASSWORD_HASH`: Argon2 PHC hash of the operator password; the
//!   administrative API answers 403 while it is unset
//! - `SITE_TIMEZONE`: IANA zone that defines "today" (default: "Europe/Moscow")
//! - `BASE_URL`: Public site URL used for links in alerts
//! - `NOTIFIER_BACKEND`: `http` or `bot` (default: "http")
//! - `EMAIL_HOST`, `EMAIL_PORT`, `EMAIL_USER`, `EMAIL_PASSWORD`,
//!   `DEFAULT_FROM_EMAIL`: SMTP relay for the contact form

use chrono_tz::Tz;
use eyre::{Result, WrapErr, eyre};
use std::env;
use tracing::Level;

/// SMTP settings for contact-form mail.
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Sender address, also the mailbox that receives contact messages
    pub default_from: String,
}

impl MailConfig {
    /// Relay credentials, when both halves are present.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Some((username.as_str(), password.as_str())),
            _ => None,
        }
    }
}

/// Configuration for the Framed API server
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// PostgreSQL database connection string
    pub database_url: String,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Argon2 hash of the operator password (optional)
    pub admin_password_hash: Option<String>,

    pub site_timezone: Tz,

    pub base_url: Option<String>,

    /// Raw `NOTIFIER_BACKEND` value, parsed by the binary
    pub notifier_backend: String,

    pub mail: MailConfig,
}

/// Parses a `LOG_LEVEL` value, falling back to `INFO`.
pub fn parse_log_level(value: &str) -> Level {
    match value.trim().to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

fn non_empty(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The DATABASE_URL environment variable is not set
    /// - API_PORT or EMAIL_PORT cannot be parsed as a u16
    /// - SITE_TIMEZONE is not a known IANA zone
    pub fn from_env() -> Result<Self> {
        // Network settings
        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Database settings
        let database_url =
            env::var("DATABASE_URL").wrap_err("DATABASE_URL environment variable must be set")?;

        // Logging settings
        let log_level = parse_log_level(&env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()));

        // CORS settings
        let cors_origins = non_empty("API_CORS_ORIGINS").map(|origins| {
            origins.split(',').map(|s| s.trim().to_string()).collect()
        });

        // Performance settings
        let request_timeout = env::var("API_REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        // Site settings
        let admin_password_hash = non_empty("ADMIN_PASSWORD_HASH");
        let site_timezone = env::var("SITE_TIMEZONE")
            .unwrap_or_else(|_| "Europe/Moscow".to_string())
            .parse::<Tz>()
            .map_err(|e| eyre!("Invalid SITE_TIMEZONE value: {}", e))?;
        let base_url = non_empty("BASE_URL").map(|url| url.trim_end_matches('/').to_string());
        let notifier_backend = env::var("NOTIFIER_BACKEND").unwrap_or_else(|_| "http".to_string());

        // Mail settings
        let username = non_empty("EMAIL_USER");
        let mail = MailConfig {
            host: env::var("EMAIL_HOST").unwrap_or_else(|_| "smtp.yandex.ru".to_string()),
            port: env::var("EMAIL_PORT")
                .unwrap_or_else(|_| "587".to_string())
                .parse()
                .wrap_err("Invalid EMAIL_PORT value")?,
            default_from: non_empty("DEFAULT_FROM_EMAIL")
                .or_else(|| username.clone())
                .unwrap_or_else(|| "webmaster@localhost".to_string()),
            password: non_empty("EMAIL_PASSWORD"),
            username,
        };

        Ok(Self {
            host,
            port,
            database_url,
            log_level,
            cors_origins,
            request_timeout,
            admin_password_hash,
            site_timezone,
            base_url,
            notifier_backend,
            mail,
        })
    }

    /// Returns the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
