use axum::{Router, routing::get};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/albums", get(handlers::portfolio::list_albums))
        .route("/api/albums/:slug", get(handlers::portfolio::get_album))
        .route("/api/photos/:id", get(handlers::portfolio::get_photo))
        .route(
            "/api/shooting-types",
            get(handlers::portfolio::list_shooting_types),
        )
        .route(
            "/api/shooting-types/:slug/albums",
            get(handlers::portfolio::albums_by_shooting_type),
        )
        .route("/api/videos", get(handlers::portfolio::list_videos))
}
