//! Row types as they come out of Postgres, plus conversions into the domain
//! models. Enumerations are stored as lowercase text.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use eyre::{Report, Result};
use framed_core::models::{
    booking::Booking,
    portfolio::{Photo, ShootingType},
    review::{Review, SocialReview},
    site::{Service, SiteSettings},
    time_slot::{SlotOccupancy, TimeSlot},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

fn parse_column<T>(column: &str, value: &str) -> Result<T>
where
    T: std::str::FromStr<Err = framed_core::errors::FramedError>,
{
    value
        .parse()
        .map_err(|e| eyre::eyre!("Invalid value in column {}: {}", column, e))
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbTimeSlot {
    pub id: Uuid,
    pub date_type: String,
    pub specific_date: Option<NaiveDate>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_available: bool,
    pub max_bookings: i32,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<DbTimeSlot> for TimeSlot {
    type Error = Report;

    fn try_from(row: DbTimeSlot) -> Result<Self> {
        Ok(TimeSlot {
            id: row.id,
            date_type: parse_column("date_type", &row.date_type)?,
            specific_date: row.specific_date,
            start_time: row.start_time,
            end_time: row.end_time,
            is_available: row.is_available,
            max_bookings: row.max_bookings,
            created_at: row.created_at,
        })
    }
}

/// A slot row joined with its confirmed booking count.
#[derive(Debug, Clone, FromRow)]
pub struct DbSlotOccupancy {
    #[sqlx(flatten)]
    pub slot: DbTimeSlot,
    pub confirmed_count: i64,
}

impl TryFrom<DbSlotOccupancy> for SlotOccupancy {
    type Error = Report;

    fn try_from(row: DbSlotOccupancy) -> Result<Self> {
        Ok(SlotOccupancy {
            slot: row.slot.try_into()?,
            confirmed_count: row.confirmed_count,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBooking {
    pub id: Uuid,
    pub time_slot_id: Uuid,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    pub shooting_type: String,
    pub message: String,
    pub is_confirmed: bool,
    pub created_at: DateTime<Utc>,
    pub confirmation_code: String,
}

impl TryFrom<DbBooking> for Booking {
    type Error = Report;

    fn try_from(row: DbBooking) -> Result<Self> {
        Ok(Booking {
            id: row.id,
            time_slot_id: row.time_slot_id,
            client_name: row.client_name,
            client_email: row.client_email,
            client_phone: row.client_phone,
            shooting_type: parse_column("shooting_type", &row.shooting_type)?,
            message: row.message,
            is_confirmed: row.is_confirmed,
            created_at: row.created_at,
            confirmation_code: row.confirmation_code,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbReview {
    pub id: Uuid,
    pub author: String,
    pub email: String,
    pub rating: i32,
    pub text: String,
    pub photo: Option<String>,
    pub is_public: bool,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<DbReview> for Review {
    type Error = Report;

    fn try_from(row: DbReview) -> Result<Self> {
        Ok(Review {
            id: row.id,
            author: row.author,
            email: row.email,
            rating: row.rating,
            text: row.text,
            photo: row.photo,
            is_public: row.is_public,
            status: parse_column("status", &row.status)?,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSocialReview {
    pub id: Uuid,
    pub source: String,
    pub external_id: String,
    pub author: String,
    pub text: String,
    pub rating: i32,
    pub photo_url: Option<String>,
    pub post_url: String,
    pub created_at: DateTime<Utc>,
    pub imported_at: DateTime<Utc>,
}

impl TryFrom<DbSocialReview> for SocialReview {
    type Error = Report;

    fn try_from(row: DbSocialReview) -> Result<Self> {
        Ok(SocialReview {
            id: row.id,
            source: parse_column("source", &row.source)?,
            external_id: row.external_id,
            author: row.author,
            text: row.text,
            rating: row.rating,
            photo_url: row.photo_url,
            post_url: row.post_url,
            created_at: row.created_at,
            imported_at: row.imported_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbShootingType {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub is_active: bool,
    pub sort_order: i32,
}

impl From<DbShootingType> for ShootingType {
    fn from(row: DbShootingType) -> Self {
        ShootingType {
            id: row.id,
            name: row.name,
            slug: row.slug,
            description: row.description,
            is_active: row.is_active,
            sort_order: row.sort_order,
        }
    }
}

/// Link row used to attach shooting types to albums and videos in one query.
#[derive(Debug, Clone, FromRow)]
pub struct DbTaggedShootingType {
    pub owner_id: Uuid,
    #[sqlx(flatten)]
    pub shooting_type: DbShootingType,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAlbum {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub cover: Option<String>,
    pub is_published: bool,
    pub is_featured: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbPhoto {
    pub id: Uuid,
    pub album_id: Uuid,
    pub image: String,
    pub title: String,
    pub description: String,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub is_cover_candidate: bool,
}

impl From<DbPhoto> for Photo {
    fn from(row: DbPhoto) -> Self {
        Photo {
            id: row.id,
            album_id: row.album_id,
            image: row.image,
            title: row.title,
            description: row.description,
            sort_order: row.sort_order,
            created_at: row.created_at,
            is_cover_candidate: row.is_cover_candidate,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbVideo {
    pub id: Uuid,
    pub title: String,
    pub video_file: Option<String>,
    pub youtube_url: Option<String>,
    pub thumbnail: Option<String>,
    pub description: String,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbService {
    pub id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub description: String,
    pub is_active: bool,
}

impl From<DbService> for Service {
    fn from(row: DbService) -> Self {
        Service {
            id: row.id,
            name: row.name,
            price: row.price,
            description: row.description,
            is_active: row.is_active,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSiteSettings {
    pub title: String,
    pub phone: String,
    pub email: String,
    pub instagram: Option<String>,
    pub telegram: Option<String>,
    pub whatsapp: Option<String>,
    pub vk: Option<String>,
    pub about_text: String,
}

impl From<DbSiteSettings> for SiteSettings {
    fn from(row: DbSiteSettings) -> Self {
        SiteSettings {
            title: row.title,
            phone: row.phone,
            email: row.email,
            instagram: row.instagram,
            telegram: row.telegram,
            whatsapp: row.whatsapp,
            vk: row.vk,
            about_text: row.about_text,
        }
    }
}
