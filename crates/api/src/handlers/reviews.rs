use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use framed_core::models::{
    pagination::{Page, PageRequest},
    review::{CreateReviewRequest, REVIEWS_PER_PAGE, ReviewResponse, SocialReview},
};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{ApiState, handlers::PageQuery, middleware::error_handling::AppError};

#[derive(Debug, Serialize)]
pub struct ReviewSubmittedResponse {
    pub id: Uuid,
    pub status: String,
}

/// New reviews wait for moderation before they are listed.
#[axum::debug_handler]
pub async fn submit_review(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<ReviewSubmittedResponse>), AppError> {
    payload.validate()?;

    let review = state.store.create_review(&payload).await?;
    tracing::info!("Review {} submitted, awaiting moderation", review.id);

    Ok((
        StatusCode::CREATED,
        Json(ReviewSubmittedResponse {
            id: review.id,
            status: review.status.to_string(),
        }),
    ))
}

#[axum::debug_handler]
pub async fn list_reviews(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<ReviewResponse>>, AppError> {
    let page = PageRequest::new(query.page, REVIEWS_PER_PAGE);

    let reviews = state.store.list_public_reviews(page).await?;

    Ok(Json(reviews.map(ReviewResponse::from)))
}

#[axum::debug_handler]
pub async fn list_social_reviews(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<SocialReview>>, AppError> {
    Ok(Json(state.store.list_social_reviews().await?))
}
