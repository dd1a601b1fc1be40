use axum::http::StatusCode;
use framed_core::models::{
    pagination::Page,
    portfolio::{
        Album, AlbumDetailResponse, CreateAlbumRequest, CreatePhotoRequest,
        CreateShootingTypeRequest, CreateVideoRequest, ShootingType, UpdateAlbumRequest,
        VideoResponse,
    },
};
use framed_db::{PortfolioRepository, mock::MemoryStore};
use pretty_assertions::assert_eq;
use uuid::Uuid;

use crate::test_utils::TestContext;

async fn shooting_type(store: &MemoryStore, slug: &str, is_active: bool) -> ShootingType {
    store
        .create_shooting_type(&CreateShootingTypeRequest {
            name: slug.to_uppercase(),
            slug: slug.to_string(),
            description: String::new(),
            is_active,
            sort_order: 0,
        })
        .await
        .unwrap()
}

async fn album(store: &MemoryStore, title: &str, types: &[&ShootingType], featured: bool) -> Album {
    store
        .create_album(&CreateAlbumRequest {
            title: title.to_string(),
            slug: title.to_lowercase().replace(' ', "-"),
            description: String::new(),
            cover: Some("albums/cover.jpg".to_string()),
            shooting_type_ids: types.iter().map(|t| t.id).collect(),
            is_published: true,
            is_featured: featured,
            sort_order: 0,
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn gallery_filters_by_type_title_and_featured() {
    let ctx = TestContext::new();
    let family = shooting_type(&ctx.store, "family", true).await;
    let portrait = shooting_type(&ctx.store, "portrait", true).await;
    album(&ctx.store, "Summer Family", &[&family], true).await;
    album(&ctx.store, "Autumn Portraits", &[&portrait], false).await;
    album(&ctx.store, "Winter Family", &[&family], false).await;
    let server = ctx.server();

    let by_type: Page<Album> = server
        .get("/api/albums")
        .add_query_param("shooting_type", "family")
        .await
        .json();
    assert_eq!(by_type.total, 2);

    let by_title: Page<Album> = server
        .get("/api/albums")
        .add_query_param("title", "autumn")
        .await
        .json();
    assert_eq!(by_title.items.len(), 1);
    assert_eq!(by_title.items[0].title, "Autumn Portraits");

    let featured: Page<Album> = server
        .get("/api/albums")
        .add_query_param("is_featured", true)
        .await
        .json();
    assert_eq!(featured.items.len(), 1);
    assert_eq!(featured.items[0].title, "Summer Family");
}

#[tokio::test]
async fn inactive_shooting_type_page_is_not_found() {
    let ctx = TestContext::new();
    let hidden = shooting_type(&ctx.store, "boudoir", false).await;
    album(&ctx.store, "Private", &[&hidden], false).await;
    let server = ctx.server();

    server
        .get("/api/shooting-types/boudoir/albums")
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let listed: Vec<ShootingType> = server.get("/api/shooting-types").await.json();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn album_page_lists_photos_and_hides_unpublished() {
    let ctx = TestContext::new();
    let published = album(&ctx.store, "Sea Walk", &[], false).await;
    let draft = album(&ctx.store, "Draft", &[], false).await;
    ctx.store
        .update_album(
            draft.id,
            &UpdateAlbumRequest {
                is_published: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let photo = ctx
        .store
        .create_photo(&CreatePhotoRequest {
            album_id: published.id,
            image: "photos/sea-1.jpg".to_string(),
            title: String::new(),
            description: String::new(),
            sort_order: 0,
            is_cover_candidate: false,
        })
        .await
        .unwrap()
        .unwrap();
    let hidden_photo = ctx
        .store
        .create_photo(&CreatePhotoRequest {
            album_id: draft.id,
            image: "photos/draft-1.jpg".to_string(),
            title: String::new(),
            description: String::new(),
            sort_order: 0,
            is_cover_candidate: false,
        })
        .await
        .unwrap()
        .unwrap();
    let server = ctx.server();

    let detail: AlbumDetailResponse = server.get("/api/albums/sea-walk").await.json();
    assert_eq!(detail.photos.len(), 1);
    assert_eq!(detail.photos[0].id, photo.id);

    server.get("/api/albums/draft").await.assert_status(StatusCode::NOT_FOUND);
    server
        .get(&format!("/api/photos/{}", photo.id))
        .await
        .assert_status_ok();
    server
        .get(&format!("/api/photos/{}", hidden_photo.id))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    server
        .get(&format!("/api/photos/{}", Uuid::new_v4()))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn videos_carry_embed_urls() {
    let ctx = TestContext::new();
    ctx.store
        .create_video(&CreateVideoRequest {
            title: "Wedding teaser".to_string(),
            video_file: None,
            youtube_url: Some("https://youtu.be/dQw4w9WgXcQ".to_string()),
            thumbnail: None,
            description: String::new(),
            shooting_type_ids: Vec::new(),
            is_published: true,
        })
        .await
        .unwrap();
    let server = ctx.server();

    let videos: Page<VideoResponse> = server.get("/api/videos").await.json();

    assert_eq!(videos.items.len(), 1);
    assert_eq!(
        videos.items[0].embed_url.as_deref(),
        Some("https://www.youtube.com/embed/dQw4w9WgXcQ")
    );
}

#[tokio::test]
async fn site_settings_default_and_services_hide_inactive() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let (name, value) = crate::test_utils::operator_auth();

    let settings: serde_json::Value = server.get("/api/site").await.json();
    assert_eq!(settings["title"], "Photographer");

    for (service, active) in [("Portrait", true), ("Retouch", false)] {
        server
            .post("/api/admin/services")
            .add_header(name.clone(), value.clone())
            .json(&serde_json::json!({ "name": service, "price": "5000.00", "is_active": active }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let services: Vec<serde_json::Value> = server.get("/api/services").await.json();
    assert_eq!(services.len(), 1);
    assert_eq!(services[0]["name"], "Portrait");
}
