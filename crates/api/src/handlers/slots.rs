use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::NaiveDate;
use framed_core::{errors::FramedError, models::time_slot::TimeSlotResponse};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{ApiState, booking, middleware::error_handling::AppError};

#[derive(Debug, Deserialize)]
pub struct SlotQuery {
    /// Defaults to today in the site's timezone.
    pub date: Option<NaiveDate>,
}

#[axum::debug_handler]
pub async fn list_available_slots(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<SlotQuery>,
) -> Result<Json<Vec<TimeSlotResponse>>, AppError> {
    let date = query.date.unwrap_or_else(|| state.site.today());

    let slots = booking::list_available(&state, date).await?;

    Ok(Json(slots.into_iter().map(TimeSlotResponse::from).collect()))
}

#[axum::debug_handler]
pub async fn get_slot(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<TimeSlotResponse>, AppError> {
    let occupancy = state
        .store
        .get_time_slot(id)
        .await?
        .filter(|occupancy| occupancy.slot.is_available)
        .ok_or_else(|| FramedError::NotFound(format!("Time slot {} not found", id)))?;

    Ok(Json(occupancy.into()))
}
