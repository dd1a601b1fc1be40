use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use framed_core::{
    errors::FramedError,
    models::time_slot::{
        DateType, SetAvailabilityRequest, SlotOccupancy, TimeSlotDraft, TimeSlotResponse,
    },
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{ApiState, handlers::admin::UpdatedResponse, middleware::error_handling::AppError};

#[derive(Debug, Deserialize)]
pub struct SlotListQuery {
    pub date_type: Option<DateType>,
}

#[axum::debug_handler]
pub async fn list_slots(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<SlotListQuery>,
) -> Result<Json<Vec<TimeSlotResponse>>, AppError> {
    let slots = state.store.list_time_slots(query.date_type).await?;

    Ok(Json(slots.into_iter().map(TimeSlotResponse::from).collect()))
}

#[axum::debug_handler]
pub async fn create_slot(
    State(state): State<Arc<ApiState>>,
    Json(draft): Json<TimeSlotDraft>,
) -> Result<(StatusCode, Json<TimeSlotResponse>), AppError> {
    let new_slot = draft.validate(state.site.today())?;

    let slot = state.store.create_time_slot(&new_slot).await?;
    tracing::info!("Time slot {} created: {}", slot.id, slot.label());

    let occupancy = SlotOccupancy {
        slot,
        confirmed_count: 0,
    };
    Ok((StatusCode::CREATED, Json(occupancy.into())))
}

/// Replaces every field of the slot; the draft is validated as on creation.
#[axum::debug_handler]
pub async fn update_slot(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(draft): Json<TimeSlotDraft>,
) -> Result<Json<TimeSlotResponse>, AppError> {
    let new_slot = draft.validate(state.site.today())?;

    state
        .store
        .update_time_slot(id, &new_slot)
        .await?
        .ok_or_else(|| FramedError::NotFound(format!("Time slot {} not found", id)))?;

    let occupancy = state
        .store
        .get_time_slot(id)
        .await?
        .ok_or_else(|| FramedError::NotFound(format!("Time slot {} not found", id)))?;

    Ok(Json(occupancy.into()))
}

/// Deleting a slot also deletes its bookings.
#[axum::debug_handler]
pub async fn delete_slot(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.store.delete_time_slot(id).await? {
        return Err(FramedError::NotFound(format!("Time slot {} not found", id)).into());
    }
    tracing::info!("Time slot {} deleted", id);

    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn set_availability(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<SetAvailabilityRequest>,
) -> Result<Json<UpdatedResponse>, AppError> {
    let updated = state
        .store
        .set_availability(&payload.ids, payload.is_available)
        .await?;

    Ok(Json(UpdatedResponse { updated }))
}
