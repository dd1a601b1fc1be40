use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/site", get(handlers::site::get_site_settings))
        .route("/api/services", get(handlers::site::list_services))
        .route("/api/contact", post(handlers::site::submit_contact))
}
