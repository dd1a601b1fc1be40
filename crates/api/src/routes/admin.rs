use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
};
use std::sync::Arc;

use crate::{
    ApiState,
    handlers::admin::{bookings, content, reviews, slots},
    middleware::auth::require_operator,
};

/// Every route here requires the operator password.
pub fn routes(state: Arc<ApiState>) -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/admin/slots",
            get(slots::list_slots).post(slots::create_slot),
        )
        .route(
            "/api/admin/slots/availability",
            post(slots::set_availability),
        )
        .route(
            "/api/admin/slots/:id",
            put(slots::update_slot).delete(slots::delete_slot),
        )
        .route("/api/admin/bookings", get(bookings::list_bookings))
        .route("/api/admin/bookings/confirm", post(bookings::bulk_confirm))
        .route("/api/admin/bookings/export", get(bookings::export_contacts))
        .route(
            "/api/admin/bookings/:id/confirmation",
            put(bookings::set_confirmed),
        )
        .route("/api/admin/reviews", get(reviews::list_reviews))
        .route(
            "/api/admin/reviews/moderate",
            post(reviews::moderate_reviews),
        )
        .route(
            "/api/admin/social-reviews",
            post(reviews::create_social_review),
        )
        .route(
            "/api/admin/social-reviews/:id",
            delete(reviews::delete_social_review),
        )
        .route(
            "/api/admin/shooting-types",
            get(content::list_shooting_types).post(content::create_shooting_type),
        )
        .route(
            "/api/admin/shooting-types/:id",
            delete(content::delete_shooting_type),
        )
        .route("/api/admin/albums", post(content::create_album))
        .route(
            "/api/admin/albums/:id",
            get(content::get_album)
                .put(content::update_album)
                .delete(content::delete_album),
        )
        .route("/api/admin/photos", post(content::create_photo))
        .route(
            "/api/admin/photos/:id",
            delete(content::delete_photo),
        )
        .route("/api/admin/videos", post(content::create_video))
        .route(
            "/api/admin/videos/:id",
            delete(content::delete_video),
        )
        .route(
            "/api/admin/services",
            get(content::list_services).post(content::create_service),
        )
        .route(
            "/api/admin/services/:id",
            put(content::update_service).delete(content::delete_service),
        )
        .route("/api/admin/site", put(content::update_site_settings))
        .route_layer(from_fn_with_state(state, require_operator))
}
