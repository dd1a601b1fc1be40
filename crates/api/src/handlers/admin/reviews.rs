use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use framed_core::{
    errors::FramedError,
    models::review::{
        CreateSocialReviewRequest, ModerateReviewsRequest, Review, ReviewStatus, SocialReview,
    },
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{ApiState, handlers::admin::UpdatedResponse, middleware::error_handling::AppError};

#[derive(Debug, Deserialize)]
pub struct ReviewListQuery {
    pub status: Option<ReviewStatus>,
}

#[axum::debug_handler]
pub async fn list_reviews(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<ReviewListQuery>,
) -> Result<Json<Vec<Review>>, AppError> {
    Ok(Json(state.store.list_reviews(query.status).await?))
}

/// approve / reject / publish / unpublish applied to every listed review.
#[axum::debug_handler]
pub async fn moderate_reviews(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<ModerateReviewsRequest>,
) -> Result<Json<UpdatedResponse>, AppError> {
    let updated = state
        .store
        .moderate_reviews(&payload.ids, payload.action)
        .await?;
    tracing::info!("{:?} applied to {} reviews", payload.action, updated);

    Ok(Json(UpdatedResponse { updated }))
}

#[axum::debug_handler]
pub async fn create_social_review(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateSocialReviewRequest>,
) -> Result<(StatusCode, Json<SocialReview>), AppError> {
    payload.validate()?;

    let review = state.store.create_social_review(&payload).await?;

    Ok((StatusCode::CREATED, Json(review)))
}

#[axum::debug_handler]
pub async fn delete_social_review(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.store.delete_social_review(id).await? {
        return Err(FramedError::NotFound(format!("Social review {} not found", id)).into());
    }

    Ok(StatusCode::NO_CONTENT)
}
