use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use framed_core::models::booking::{BookingResponse, CreateBookingRequest, CreateBookingResponse};
use std::sync::Arc;
use uuid::Uuid;

use crate::{ApiState, booking, middleware::error_handling::AppError};

#[axum::debug_handler]
pub async fn create_booking(
    State(state): State<Arc<ApiState>>,
    Path(slot_id): Path<Uuid>,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<CreateBookingResponse>), AppError> {
    let response = booking::create_booking(&state, slot_id, payload).await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// Backs both the "thank you" page and the status page.
#[axum::debug_handler]
pub async fn get_booking(
    State(state): State<Arc<ApiState>>,
    Path(code): Path<String>,
) -> Result<Json<BookingResponse>, AppError> {
    Ok(Json(booking::lookup_by_code(&state, &code).await?))
}
