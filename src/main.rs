use std::sync::Arc;

use color_eyre::eyre::Result;
use dotenv::dotenv;
use framed_api::{ApiState, SiteContext, config::ApiConfig, init_tracing, mail::build_mailer};
use framed_db::{PgStore, create_pool, schema::initialize_database};
use framed_telegram::{
    build_notifier,
    config::{NotifierBackend, TelegramConfig},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;
    init_tracing(config.log_level)?;

    // Create database connection pool
    let db_pool = create_pool(&config.database_url).await?;

    // Initialize database schema
    initialize_database(&db_pool).await?;

    // Outbound integrations
    let backend: NotifierBackend = config.notifier_backend.parse()?;
    let notifier = build_notifier(&TelegramConfig::from_env()?, backend)?;
    let mailer = build_mailer(&config.mail)?;

    let state = Arc::new(ApiState {
        store: Arc::new(PgStore::new(db_pool)),
        notifier,
        mailer,
        site: SiteContext::from_config(&config),
    });

    // Start API server
    framed_api::start_server(config, state).await?;

    Ok(())
}
