//! Storage seams. Every repository is an `async_trait` so the API can run
//! against Postgres ([`PgStore`]) or the in-memory store in [`crate::mock`].

pub mod booking;
pub mod portfolio;
pub mod review;
pub mod site;
pub mod time_slot;

use async_trait::async_trait;
use chrono::NaiveDate;
use eyre::Result;
use framed_core::models::{
    booking::{Booking, NewBooking},
    pagination::{Page, PageRequest},
    portfolio::{
        Album, AlbumFilter, CreateAlbumRequest, CreatePhotoRequest, CreateShootingTypeRequest,
        CreateVideoRequest, Photo, ShootingType, UpdateAlbumRequest, Video,
    },
    review::{
        CreateReviewRequest, CreateSocialReviewRequest, ModerationAction, Review, ReviewStatus,
        SocialReview,
    },
    site::{CreateServiceRequest, Service, SiteSettings, UpdateServiceRequest},
    time_slot::{DateType, NewTimeSlot, SlotOccupancy, TimeSlot},
};
use uuid::Uuid;

use crate::DbPool;

/// Result of trying to book a slot under the slot lock.
#[derive(Debug, Clone, PartialEq)]
pub enum ReservationOutcome {
    Created(Booking),
    SlotMissing,
    SlotUnavailable,
    SlotFull,
}

/// Result of toggling a booking's confirmation under the slot lock.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmationOutcome {
    Updated(Booking),
    BookingMissing,
    /// Confirming would push the slot past `max_bookings`.
    SlotFull,
}

#[async_trait]
pub trait TimeSlotRepository: Send + Sync {
    async fn create_time_slot(&self, slot: &NewTimeSlot) -> Result<TimeSlot>;

    async fn update_time_slot(&self, id: Uuid, slot: &NewTimeSlot) -> Result<Option<TimeSlot>>;

    /// Deletes the slot and, by cascade, its bookings.
    async fn delete_time_slot(&self, id: Uuid) -> Result<bool>;

    async fn get_time_slot(&self, id: Uuid) -> Result<Option<SlotOccupancy>>;

    /// All slots, ordered by date then start time; undated slots last.
    async fn list_time_slots(&self, date_type: Option<DateType>) -> Result<Vec<SlotOccupancy>>;

    /// Specific-date slots on `date`, ordered by start time.
    async fn list_time_slots_for_date(&self, date: NaiveDate) -> Result<Vec<SlotOccupancy>>;

    async fn set_availability(&self, ids: &[Uuid], is_available: bool) -> Result<u64>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Rechecks availability and capacity while holding the slot lock, then
    /// inserts the booking unconfirmed.
    async fn reserve_slot(&self, booking: NewBooking) -> Result<ReservationOutcome>;

    async fn get_booking_by_code(&self, code: &str) -> Result<Option<Booking>>;

    /// Newest first.
    async fn list_bookings(&self, confirmed: Option<bool>) -> Result<Vec<Booking>>;

    async fn set_booking_confirmed(&self, id: Uuid, confirmed: bool)
    -> Result<ConfirmationOutcome>;
}

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn create_review(&self, review: &CreateReviewRequest) -> Result<Review>;

    /// Approved and public reviews, newest first.
    async fn list_public_reviews(&self, page: PageRequest) -> Result<Page<Review>>;

    async fn list_reviews(&self, status: Option<ReviewStatus>) -> Result<Vec<Review>>;

    async fn moderate_reviews(&self, ids: &[Uuid], action: ModerationAction) -> Result<u64>;

    async fn create_social_review(
        &self,
        review: &CreateSocialReviewRequest,
    ) -> Result<SocialReview>;

    async fn list_social_reviews(&self) -> Result<Vec<SocialReview>>;

    async fn delete_social_review(&self, id: Uuid) -> Result<bool>;
}

#[async_trait]
pub trait PortfolioRepository: Send + Sync {
    async fn create_shooting_type(
        &self,
        shooting_type: &CreateShootingTypeRequest,
    ) -> Result<ShootingType>;

    async fn list_shooting_types(&self, active_only: bool) -> Result<Vec<ShootingType>>;

    async fn get_shooting_type_by_slug(&self, slug: &str) -> Result<Option<ShootingType>>;

    async fn delete_shooting_type(&self, id: Uuid) -> Result<bool>;

    /// Unknown shooting type ids are ignored.
    async fn create_album(&self, album: &CreateAlbumRequest) -> Result<Album>;

    async fn update_album(&self, id: Uuid, update: &UpdateAlbumRequest) -> Result<Option<Album>>;

    async fn delete_album(&self, id: Uuid) -> Result<bool>;

    async fn get_album(&self, id: Uuid) -> Result<Option<Album>>;

    /// Published albums passing `filter`, ordered by (sort order, newest).
    async fn list_published_albums(
        &self,
        filter: &AlbumFilter,
        page: PageRequest,
    ) -> Result<Page<Album>>;

    async fn get_published_album(&self, slug: &str) -> Result<Option<Album>>;

    async fn list_album_photos(&self, album_id: Uuid) -> Result<Vec<Photo>>;

    async fn get_photo(&self, id: Uuid) -> Result<Option<Photo>>;

    /// `None` when the album does not exist.
    async fn create_photo(&self, photo: &CreatePhotoRequest) -> Result<Option<Photo>>;

    async fn delete_photo(&self, id: Uuid) -> Result<bool>;

    async fn list_published_videos(&self, page: PageRequest) -> Result<Page<Video>>;

    async fn create_video(&self, video: &CreateVideoRequest) -> Result<Video>;

    async fn delete_video(&self, id: Uuid) -> Result<bool>;
}

#[async_trait]
pub trait SiteRepository: Send + Sync {
    /// Returns the stored settings, creating the default row on first use.
    async fn load_site_settings(&self) -> Result<SiteSettings>;

    async fn update_site_settings(&self, settings: &SiteSettings) -> Result<SiteSettings>;

    /// Ordered by price.
    async fn list_services(&self, active_only: bool) -> Result<Vec<Service>>;

    async fn create_service(&self, service: &CreateServiceRequest) -> Result<Service>;

    async fn update_service(
        &self,
        id: Uuid,
        update: &UpdateServiceRequest,
    ) -> Result<Option<Service>>;

    async fn delete_service(&self, id: Uuid) -> Result<bool>;
}

/// Everything the API needs from storage.
pub trait Store:
    TimeSlotRepository + BookingRepository + ReviewRepository + PortfolioRepository + SiteRepository
{
}

impl<T> Store for T where
    T: TimeSlotRepository
        + BookingRepository
        + ReviewRepository
        + PortfolioRepository
        + SiteRepository
{
}

/// Postgres-backed [`Store`].
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}
