//! Portfolio and site content managed by the operator.
//!
//! Uploaded media is referenced by storage path; the files themselves are
//! stored elsewhere.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use framed_core::{
    errors::FramedError,
    models::{
        portfolio::{
            Album, CreateAlbumRequest, CreatePhotoRequest, CreateShootingTypeRequest,
            CreateVideoRequest, Photo, ShootingType, UpdateAlbumRequest, VideoResponse,
        },
        site::{CreateServiceRequest, Service, SiteSettings, UpdateServiceRequest},
    },
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

fn not_found(kind: &str, id: Uuid) -> AppError {
    FramedError::NotFound(format!("{} {} not found", kind, id)).into()
}

fn deleted(found: bool, kind: &str, id: Uuid) -> Result<StatusCode, AppError> {
    if found {
        tracing::info!("{} {} deleted", kind, id);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(kind, id))
    }
}

// Shooting types

#[axum::debug_handler]
pub async fn list_shooting_types(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<ShootingType>>, AppError> {
    Ok(Json(state.store.list_shooting_types(false).await?))
}

#[axum::debug_handler]
pub async fn create_shooting_type(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateShootingTypeRequest>,
) -> Result<(StatusCode, Json<ShootingType>), AppError> {
    payload.validate()?;

    let shooting_type = state.store.create_shooting_type(&payload).await?;

    Ok((StatusCode::CREATED, Json(shooting_type)))
}

#[axum::debug_handler]
pub async fn delete_shooting_type(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    deleted(state.store.delete_shooting_type(id).await?, "Shooting type", id)
}

// Albums and photos

#[axum::debug_handler]
pub async fn get_album(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Album>, AppError> {
    let album = state
        .store
        .get_album(id)
        .await?
        .ok_or_else(|| not_found("Album", id))?;

    Ok(Json(album))
}

#[axum::debug_handler]
pub async fn create_album(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateAlbumRequest>,
) -> Result<(StatusCode, Json<Album>), AppError> {
    payload.validate()?;

    let album = state.store.create_album(&payload).await?;
    tracing::info!("Album {} created", album.slug);

    Ok((StatusCode::CREATED, Json(album)))
}

#[axum::debug_handler]
pub async fn update_album(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAlbumRequest>,
) -> Result<Json<Album>, AppError> {
    payload.validate()?;

    let album = state
        .store
        .update_album(id, &payload)
        .await?
        .ok_or_else(|| not_found("Album", id))?;

    Ok(Json(album))
}

/// Photos of the album go with it.
#[axum::debug_handler]
pub async fn delete_album(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    deleted(state.store.delete_album(id).await?, "Album", id)
}

#[axum::debug_handler]
pub async fn create_photo(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreatePhotoRequest>,
) -> Result<(StatusCode, Json<Photo>), AppError> {
    payload.validate()?;

    let photo = state
        .store
        .create_photo(&payload)
        .await?
        .ok_or_else(|| not_found("Album", payload.album_id))?;

    Ok((StatusCode::CREATED, Json(photo)))
}

#[axum::debug_handler]
pub async fn delete_photo(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    deleted(state.store.delete_photo(id).await?, "Photo", id)
}

// Videos

#[axum::debug_handler]
pub async fn create_video(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateVideoRequest>,
) -> Result<(StatusCode, Json<VideoResponse>), AppError> {
    payload.validate()?;

    let video = state.store.create_video(&payload).await?;

    Ok((StatusCode::CREATED, Json(video.into())))
}

#[axum::debug_handler]
pub async fn delete_video(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    deleted(state.store.delete_video(id).await?, "Video", id)
}

// Services and site settings

#[axum::debug_handler]
pub async fn list_services(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Service>>, AppError> {
    Ok(Json(state.store.list_services(false).await?))
}

#[axum::debug_handler]
pub async fn create_service(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateServiceRequest>,
) -> Result<(StatusCode, Json<Service>), AppError> {
    payload.validate()?;

    let service = state.store.create_service(&payload).await?;

    Ok((StatusCode::CREATED, Json(service)))
}

#[axum::debug_handler]
pub async fn update_service(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateServiceRequest>,
) -> Result<Json<Service>, AppError> {
    payload.validate()?;

    let service = state
        .store
        .update_service(id, &payload)
        .await?
        .ok_or_else(|| not_found("Service", id))?;

    Ok(Json(service))
}

#[axum::debug_handler]
pub async fn delete_service(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    deleted(state.store.delete_service(id).await?, "Service", id)
}

#[axum::debug_handler]
pub async fn update_site_settings(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<SiteSettings>,
) -> Result<Json<SiteSettings>, AppError> {
    payload.validate()?;

    Ok(Json(state.store.update_site_settings(&payload).await?))
}
