use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/slots/:id/bookings",
            post(handlers::bookings::create_booking),
        )
        .route("/api/bookings/:code", get(handlers::bookings::get_booking))
}
