use axum::{Router, routing::get};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/reviews",
            get(handlers::reviews::list_reviews).post(handlers::reviews::submit_review),
        )
        .route(
            "/api/social-reviews",
            get(handlers::reviews::list_social_reviews),
        )
}
