use axum::{
    Json,
    extract::{Path, Query, State},
};
use framed_core::{
    errors::FramedError,
    models::{
        pagination::{Page, PageRequest},
        portfolio::{
            Album, AlbumDetailResponse, AlbumFilter, GALLERY_PER_PAGE, Photo, ShootingType,
            VideoResponse,
        },
    },
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{ApiState, handlers::PageQuery, middleware::error_handling::AppError};

/// Published albums, filtered by `shooting_type`, `title` and `is_featured`.
#[axum::debug_handler]
pub async fn list_albums(
    State(state): State<Arc<ApiState>>,
    Query(filter): Query<AlbumFilter>,
) -> Result<Json<Page<Album>>, AppError> {
    let page = PageRequest::new(filter.page, GALLERY_PER_PAGE);

    Ok(Json(state.store.list_published_albums(&filter, page).await?))
}

#[axum::debug_handler]
pub async fn get_album(
    State(state): State<Arc<ApiState>>,
    Path(slug): Path<String>,
) -> Result<Json<AlbumDetailResponse>, AppError> {
    let album = state
        .store
        .get_published_album(&slug)
        .await?
        .ok_or_else(|| FramedError::NotFound(format!("Album {} not found", slug)))?;
    let photos = state.store.list_album_photos(album.id).await?;

    Ok(Json(AlbumDetailResponse { album, photos }))
}

#[axum::debug_handler]
pub async fn list_shooting_types(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<ShootingType>>, AppError> {
    Ok(Json(state.store.list_shooting_types(true).await?))
}

/// Gallery page for one shooting type; inactive types are not found.
#[axum::debug_handler]
pub async fn albums_by_shooting_type(
    State(state): State<Arc<ApiState>>,
    Path(slug): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<Album>>, AppError> {
    let shooting_type = state
        .store
        .get_shooting_type_by_slug(&slug)
        .await?
        .filter(|shooting_type| shooting_type.is_active)
        .ok_or_else(|| FramedError::NotFound(format!("Shooting type {} not found", slug)))?;

    let filter = AlbumFilter {
        shooting_type: Some(shooting_type.slug),
        ..Default::default()
    };
    let page = PageRequest::new(query.page, GALLERY_PER_PAGE);

    Ok(Json(state.store.list_published_albums(&filter, page).await?))
}

/// Fullscreen view of a single photo from a published album.
#[axum::debug_handler]
pub async fn get_photo(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Photo>, AppError> {
    let not_found = || FramedError::NotFound(format!("Photo {} not found", id));

    let photo = state.store.get_photo(id).await?.ok_or_else(not_found)?;
    let album = state.store.get_album(photo.album_id).await?;
    if !album.is_some_and(|album| album.is_published) {
        return Err(not_found().into());
    }

    Ok(Json(photo))
}

#[axum::debug_handler]
pub async fn list_videos(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<VideoResponse>>, AppError> {
    let page = PageRequest::new(query.page, GALLERY_PER_PAGE);

    let videos = state.store.list_published_videos(page).await?;

    Ok(Json(videos.map(VideoResponse::from)))
}
