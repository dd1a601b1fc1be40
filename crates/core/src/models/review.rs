use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    errors::{FramedError, FramedResult},
    models::portfolio::IMAGE_EXTENSIONS,
    validation::{
        require_text, validate_email, validate_extension, validate_rating, validate_url,
    },
};

/// Reviews shown per public listing page.
pub const REVIEWS_PER_PAGE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => "pending",
            ReviewStatus::Approved => "approved",
            ReviewStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReviewStatus {
    type Err = FramedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ReviewStatus::Pending),
            "approved" => Ok(ReviewStatus::Approved),
            "rejected" => Ok(ReviewStatus::Rejected),
            other => Err(FramedError::Validation(format!("Unknown review status: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: Uuid,
    pub author: String,
    pub email: String,
    pub rating: i32,
    pub text: String,
    pub photo: Option<String>,
    pub is_public: bool,
    pub status: ReviewStatus,
    pub created_at: DateTime<Utc>,
}

impl Review {
    /// Only approved reviews the operator also marked public are shown.
    pub fn is_publicly_visible(&self) -> bool {
        self.status == ReviewStatus::Approved && self.is_public
    }

    /// Applies a moderation action in place.
    pub fn apply(&mut self, action: ModerationAction) {
        match action {
            ModerationAction::Approve => self.status = ReviewStatus::Approved,
            ModerationAction::Reject => self.status = ReviewStatus::Rejected,
            ModerationAction::Publish => self.is_public = true,
            ModerationAction::Unpublish => self.is_public = false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReviewRequest {
    pub author: String,
    pub email: String,
    pub rating: i32,
    pub text: String,
    pub photo: Option<String>,
}

impl CreateReviewRequest {
    pub fn validate(&self) -> FramedResult<()> {
        require_text("Author", &self.author, 100)?;
        validate_email("Email", &self.email)?;
        validate_rating(self.rating)?;
        require_text("Review text", &self.text, 5000)?;
        if let Some(photo) = &self.photo {
            validate_extension("Photo", photo, IMAGE_EXTENSIONS)?;
        }
        Ok(())
    }
}

/// Public projection: the author's e-mail stays private.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewResponse {
    pub id: Uuid,
    pub author: String,
    pub rating: i32,
    pub text: String,
    pub photo: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            id: review.id,
            author: review.author,
            rating: review.rating,
            text: review.text,
            photo: review.photo,
            created_at: review.created_at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationAction {
    Approve,
    Reject,
    Publish,
    Unpublish,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModerateReviewsRequest {
    pub ids: Vec<Uuid>,
    pub action: ModerationAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialSource {
    Instagram,
    Vk,
}

impl SocialSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            SocialSource::Instagram => "instagram",
            SocialSource::Vk => "vk",
        }
    }
}

impl FromStr for SocialSource {
    type Err = FramedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "instagram" => Ok(SocialSource::Instagram),
            "vk" => Ok(SocialSource::Vk),
            other => Err(FramedError::Validation(format!("Unknown review source: {}", other))),
        }
    }
}

/// A review imported from a social network post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialReview {
    pub id: Uuid,
    pub source: SocialSource,
    pub external_id: String,
    pub author: String,
    pub text: String,
    pub rating: i32,
    pub photo_url: Option<String>,
    pub post_url: String,
    pub created_at: DateTime<Utc>,
    pub imported_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSocialReviewRequest {
    pub source: SocialSource,
    pub external_id: String,
    pub author: String,
    pub text: String,
    pub rating: i32,
    pub photo_url: Option<String>,
    pub post_url: String,
    pub created_at: DateTime<Utc>,
}

impl CreateSocialReviewRequest {
    pub fn validate(&self) -> FramedResult<()> {
        require_text("External ID", &self.external_id, 100)?;
        require_text("Author", &self.author, 100)?;
        require_text("Text", &self.text, 5000)?;
        validate_rating(self.rating)?;
        validate_url("Post URL", &self.post_url)?;
        if let Some(photo_url) = &self.photo_url {
            validate_url("Photo URL", photo_url)?;
        }
        Ok(())
    }
}
