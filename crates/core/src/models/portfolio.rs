use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::{
    errors::FramedResult,
    validation::{require_text, validate_extension, validate_slug, validate_url},
};

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "avi", "webm"];

/// Albums and videos shown per gallery page.
pub const GALLERY_PER_PAGE: u32 = 12;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShootingType {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub is_active: bool,
    pub sort_order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateShootingTypeRequest {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub sort_order: i32,
}

impl CreateShootingTypeRequest {
    pub fn validate(&self) -> FramedResult<()> {
        require_text("Name", &self.name, 100)?;
        validate_slug(&self.slug)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub cover: Option<String>,
    pub shooting_types: Vec<ShootingType>,
    pub is_published: bool,
    pub is_featured: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Album {
    pub fn has_shooting_type(&self, slug: &str) -> bool {
        self.shooting_types
            .iter()
            .any(|shooting_type| shooting_type.slug == slug && shooting_type.is_active)
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAlbumRequest {
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    pub cover: Option<String>,
    #[serde(default)]
    pub shooting_type_ids: Vec<Uuid>,
    #[serde(default = "default_true")]
    pub is_published: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub sort_order: i32,
}

impl CreateAlbumRequest {
    pub fn validate(&self) -> FramedResult<()> {
        require_text("Title", &self.title, 200)?;
        validate_slug(&self.slug)?;
        if let Some(cover) = &self.cover {
            validate_extension("Cover", cover, IMAGE_EXTENSIONS)?;
        }
        Ok(())
    }
}

/// Partial album update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAlbumRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub cover: Option<String>,
    pub shooting_type_ids: Option<Vec<Uuid>>,
    pub is_published: Option<bool>,
    pub is_featured: Option<bool>,
    pub sort_order: Option<i32>,
}

impl UpdateAlbumRequest {
    pub fn validate(&self) -> FramedResult<()> {
        if let Some(title) = &self.title {
            require_text("Title", title, 200)?;
        }
        if let Some(cover) = &self.cover {
            validate_extension("Cover", cover, IMAGE_EXTENSIONS)?;
        }
        Ok(())
    }
}

/// Gallery filter from the query string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlbumFilter {
    /// Slug of an active shooting type.
    pub shooting_type: Option<String>,
    /// Case-insensitive substring of the title.
    pub title: Option<String>,
    pub is_featured: Option<bool>,
    pub page: Option<u32>,
}

impl AlbumFilter {
    /// Whether a published album passes the filter.
    pub fn matches(&self, album: &Album) -> bool {
        if !album.is_published {
            return false;
        }
        if let Some(slug) = self.shooting_type.as_deref().filter(|s| !s.is_empty()) {
            if !album.has_shooting_type(slug) {
                return false;
            }
        }
        if let Some(title) = self.title.as_deref().filter(|t| !t.is_empty()) {
            if !album.title.to_lowercase().contains(&title.to_lowercase()) {
                return false;
            }
        }
        if let Some(featured) = self.is_featured {
            if album.is_featured != featured {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub id: Uuid,
    pub album_id: Uuid,
    pub image: String,
    pub title: String,
    pub description: String,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub is_cover_candidate: bool,
}

impl Photo {
    pub fn display_title(&self) -> String {
        if self.title.is_empty() {
            format!("Photo {}", self.id)
        } else {
            self.title.clone()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePhotoRequest {
    pub album_id: Uuid,
    pub image: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default)]
    pub is_cover_candidate: bool,
}

impl CreatePhotoRequest {
    pub fn validate(&self) -> FramedResult<()> {
        validate_extension("Image", &self.image, IMAGE_EXTENSIONS)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumDetailResponse {
    pub album: Album,
    pub photos: Vec<Photo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub id: Uuid,
    pub title: String,
    pub video_file: Option<String>,
    pub youtube_url: Option<String>,
    pub thumbnail: Option<String>,
    pub description: String,
    pub shooting_types: Vec<ShootingType>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

impl Video {
    pub fn embed_url(&self) -> Option<String> {
        self.youtube_url.as_deref().and_then(youtube_embed_url)
    }
}

/// Maps `youtube.com/watch?v=ID` and `youtu.be/ID` links to the embeddable
/// player URL. Anything else yields `None`.
pub fn youtube_embed_url(link: &str) -> Option<String> {
    let parsed = Url::parse(link).ok()?;
    let host = parsed.host_str()?.trim_start_matches("www.").trim_start_matches("m.");

    let video_id = match host {
        "youtube.com" if parsed.path() == "/watch" => parsed
            .query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned()),
        "youtu.be" => Some(parsed.path().trim_matches('/').to_string()),
        _ => None,
    }?;

    if video_id.is_empty() {
        None
    } else {
        Some(format!("https://www.youtube.com/embed/{}", video_id))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVideoRequest {
    pub title: String,
    pub video_file: Option<String>,
    pub youtube_url: Option<String>,
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub shooting_type_ids: Vec<Uuid>,
    #[serde(default = "default_true")]
    pub is_published: bool,
}

impl CreateVideoRequest {
    pub fn validate(&self) -> FramedResult<()> {
        require_text("Title", &self.title, 200)?;
        if let Some(file) = &self.video_file {
            validate_extension("Video file", file, VIDEO_EXTENSIONS)?;
        }
        if let Some(thumbnail) = &self.thumbnail {
            validate_extension("Thumbnail", thumbnail, IMAGE_EXTENSIONS)?;
        }
        if let Some(link) = &self.youtube_url {
            validate_url("YouTube URL", link)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoResponse {
    #[serde(flatten)]
    pub video: Video,
    pub embed_url: Option<String>,
}

impl From<Video> for VideoResponse {
    fn from(video: Video) -> Self {
        Self {
            embed_url: video.embed_url(),
            video,
        }
    }
}
