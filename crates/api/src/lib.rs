//! # Framed API
//!
//! HTTP server for the photographer site: the public booking flow, the
//! portfolio and review pages, the contact form and the operator's
//! administrative endpoints.
//!
//! ## Architecture
//!
//! - **Routes**: URL structure, one module per area
//! - **Handlers**: request extraction and response shaping
//! - **Booking**: the slot booking workflow shared by public and admin handlers
//! - **Middleware**: operator authentication and error mapping
//! - **Mail / Notifications**: outbound contact mail and chat alerts
//!
//! Storage sits behind [`framed_db::Store`] so the whole router can run
//! against the in-memory store in tests.

/// Booking workflow
pub mod booking;
/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// SMTP delivery for contact-form mail
pub mod mail;
/// Middleware for authentication and error handling
pub mod middleware;
/// Best-effort alert dispatch
pub mod notifications;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{HeaderValue, Method, header},
};
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use eyre::Result;
use framed_core::notify::{Mailer, Notifier};
use framed_db::Store;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

/// Per-deployment settings handlers read at request time.
#[derive(Debug, Clone)]
pub struct SiteContext {
    /// Zone that defines "today" for slot listings and past-date checks
    pub timezone: Tz,
    pub admin_password_hash: Option<String>,
    /// Mailbox that receives contact-form messages
    pub contact_recipient: String,
    pub base_url: Option<String>,
}

impl SiteContext {
    pub fn from_config(config: &config::ApiConfig) -> Self {
        Self {
            timezone: config.site_timezone,
            admin_password_hash: config.admin_password_hash.clone(),
            contact_recipient: config.mail.default_from.clone(),
            base_url: config.base_url.clone(),
        }
    }

    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.timezone).date_naive()
    }
}

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    pub store: Arc<dyn Store>,
    pub notifier: Arc<dyn Notifier>,
    pub mailer: Arc<dyn Mailer>,
    pub site: SiteContext,
}

/// Installs the global fmt subscriber.
pub fn init_tracing(level: Level) -> Result<()> {
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Builds the application router with every route and the shared state
/// attached. Transport layers (CORS, tracing, timeout) are added by
/// [`start_server`].
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Public booking flow
        .merge(routes::slots::routes())
        .merge(routes::bookings::routes())
        // Site content
        .merge(routes::portfolio::routes())
        .merge(routes::reviews::routes())
        .merge(routes::site::routes())
        // Operator endpoints
        .merge(routes::admin::routes(state.clone()))
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect::<Vec<_>>();

    CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_origin(origins)
        .allow_credentials(true)
}

/// Starts the API server with the provided configuration and state
///
/// # Example
///
/// ```rust,ignore
/// let config = ApiConfig::from_env()?;
/// let state = Arc::new(ApiState { store, notifier, mailer, site: SiteContext::from_config(&config) });
/// start_server(config, state).await?;
/// ```
pub async fn start_server(config: config::ApiConfig, state: Arc<ApiState>) -> Result<()> {
    let app = build_router(state);

    // Apply CORS configuration if origins are specified
    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)),
        None => app,
    };

    let app = app.layer(
        tower::ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
