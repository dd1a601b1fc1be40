use std::cmp::Reverse;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use eyre::{Result, eyre};
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
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::repositories::{
    BookingRepository, ConfirmationOutcome, PortfolioRepository, ReservationOutcome,
    ReviewRepository, SiteRepository, TimeSlotRepository,
};

#[derive(Debug, Default)]
struct MemoryState {
    slots: Vec<TimeSlot>,
    bookings: Vec<Booking>,
    reviews: Vec<Review>,
    social_reviews: Vec<SocialReview>,
    shooting_types: Vec<ShootingType>,
    albums: Vec<Album>,
    photos: Vec<Photo>,
    videos: Vec<Video>,
    services: Vec<Service>,
    settings: Option<SiteSettings>,
}

impl MemoryState {
    fn confirmed_count(&self, slot_id: Uuid) -> i64 {
        self.bookings
            .iter()
            .filter(|booking| booking.time_slot_id == slot_id && booking.is_confirmed)
            .count() as i64
    }

    fn occupancy(&self, slot: &TimeSlot) -> SlotOccupancy {
        SlotOccupancy {
            slot: slot.clone(),
            confirmed_count: self.confirmed_count(slot.id),
        }
    }

    fn occupancies<'a>(&self, slots: impl Iterator<Item = &'a TimeSlot>) -> Vec<SlotOccupancy> {
        let mut listed: Vec<SlotOccupancy> = slots.map(|slot| self.occupancy(slot)).collect();
        listed.sort_by_key(|o| (o.slot.specific_date.is_none(), o.slot.specific_date, o.slot.start_time));
        listed
    }

    fn shooting_types_for(&self, ids: &[Uuid]) -> Vec<ShootingType> {
        let mut types: Vec<ShootingType> = self
            .shooting_types
            .iter()
            .filter(|shooting_type| ids.contains(&shooting_type.id))
            .cloned()
            .collect();
        types.sort_by(|a, b| (a.sort_order, &a.name).cmp(&(b.sort_order, &b.name)));
        types
    }
}

fn duplicate(constraint: &str, value: &str) -> eyre::Report {
    eyre!(
        "duplicate key value violates unique constraint \"{}\": {}",
        constraint,
        value
    )
}

/// Store kept behind a single async mutex; every operation is atomic with
/// respect to every other one.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TimeSlotRepository for MemoryStore {
    async fn create_time_slot(&self, slot: &NewTimeSlot) -> Result<TimeSlot> {
        let created = TimeSlot {
            id: Uuid::new_v4(),
            date_type: slot.date_type,
            specific_date: slot.specific_date,
            start_time: slot.start_time,
            end_time: slot.end_time,
            is_available: slot.is_available,
            max_bookings: slot.max_bookings,
            created_at: Utc::now(),
        };

        self.state.lock().await.slots.push(created.clone());
        Ok(created)
    }

    async fn update_time_slot(&self, id: Uuid, slot: &NewTimeSlot) -> Result<Option<TimeSlot>> {
        let mut state = self.state.lock().await;
        let Some(stored) = state.slots.iter_mut().find(|stored| stored.id == id) else {
            return Ok(None);
        };

        stored.date_type = slot.date_type;
        stored.specific_date = slot.specific_date;
        stored.start_time = slot.start_time;
        stored.end_time = slot.end_time;
        stored.is_available = slot.is_available;
        stored.max_bookings = slot.max_bookings;
        Ok(Some(stored.clone()))
    }

    async fn delete_time_slot(&self, id: Uuid) -> Result<bool> {
        let mut state = self.state.lock().await;
        let before = state.slots.len();
        state.slots.retain(|slot| slot.id != id);
        if state.slots.len() == before {
            return Ok(false);
        }

        state.bookings.retain(|booking| booking.time_slot_id != id);
        Ok(true)
    }

    async fn get_time_slot(&self, id: Uuid) -> Result<Option<SlotOccupancy>> {
        let state = self.state.lock().await;
        Ok(state
            .slots
            .iter()
            .find(|slot| slot.id == id)
            .map(|slot| state.occupancy(slot)))
    }

    async fn list_time_slots(&self, date_type: Option<DateType>) -> Result<Vec<SlotOccupancy>> {
        let state = self.state.lock().await;
        Ok(state.occupancies(
            state
                .slots
                .iter()
                .filter(|slot| date_type.is_none_or(|date_type| slot.date_type == date_type)),
        ))
    }

    async fn list_time_slots_for_date(&self, date: NaiveDate) -> Result<Vec<SlotOccupancy>> {
        let state = self.state.lock().await;
        Ok(state.occupancies(state.slots.iter().filter(|slot| {
            slot.date_type == DateType::Specific && slot.specific_date == Some(date)
        })))
    }

    async fn set_availability(&self, ids: &[Uuid], is_available: bool) -> Result<u64> {
        let mut state = self.state.lock().await;
        let mut updated = 0;
        for slot in state.slots.iter_mut().filter(|slot| ids.contains(&slot.id)) {
            slot.is_available = is_available;
            updated += 1;
        }
        Ok(updated)
    }
}

#[async_trait]
impl BookingRepository for MemoryStore {
    async fn reserve_slot(&self, booking: NewBooking) -> Result<ReservationOutcome> {
        let mut state = self.state.lock().await;

        let Some(slot) = state.slots.iter().find(|slot| slot.id == booking.time_slot_id) else {
            return Ok(ReservationOutcome::SlotMissing);
        };
        if !slot.is_available {
            return Ok(ReservationOutcome::SlotUnavailable);
        }
        if state.occupancy(slot).is_fully_booked() {
            return Ok(ReservationOutcome::SlotFull);
        }
        if state
            .bookings
            .iter()
            .any(|existing| existing.confirmation_code == booking.confirmation_code)
        {
            return Err(duplicate("bookings_confirmation_code_key", &booking.confirmation_code));
        }

        let created = Booking {
            id: Uuid::new_v4(),
            time_slot_id: booking.time_slot_id,
            client_name: booking.client_name,
            client_email: booking.client_email,
            client_phone: booking.client_phone,
            shooting_type: booking.shooting_type,
            message: booking.message,
            is_confirmed: false,
            created_at: Utc::now(),
            confirmation_code: booking.confirmation_code,
        };
        state.bookings.push(created.clone());
        Ok(ReservationOutcome::Created(created))
    }

    async fn get_booking_by_code(&self, code: &str) -> Result<Option<Booking>> {
        let state = self.state.lock().await;
        Ok(state
            .bookings
            .iter()
            .find(|booking| booking.confirmation_code == code)
            .cloned())
    }

    async fn list_bookings(&self, confirmed: Option<bool>) -> Result<Vec<Booking>> {
        let state = self.state.lock().await;
        let mut bookings: Vec<Booking> = state
            .bookings
            .iter()
            .rev()
            .filter(|booking| confirmed.is_none_or(|confirmed| booking.is_confirmed == confirmed))
            .cloned()
            .collect();
        bookings.sort_by_key(|booking| Reverse(booking.created_at));
        Ok(bookings)
    }

    async fn set_booking_confirmed(
        &self,
        id: Uuid,
        confirmed: bool,
    ) -> Result<ConfirmationOutcome> {
        let mut state = self.state.lock().await;

        let Some(index) = state.bookings.iter().position(|booking| booking.id == id) else {
            return Ok(ConfirmationOutcome::BookingMissing);
        };
        let current = &state.bookings[index];
        if current.is_confirmed == confirmed {
            return Ok(ConfirmationOutcome::Updated(current.clone()));
        }

        if confirmed {
            let slot_id = current.time_slot_id;
            let Some(max_bookings) = state
                .slots
                .iter()
                .find(|slot| slot.id == slot_id)
                .map(|slot| i64::from(slot.max_bookings))
            else {
                return Ok(ConfirmationOutcome::BookingMissing);
            };
            if state.confirmed_count(slot_id) >= max_bookings {
                return Ok(ConfirmationOutcome::SlotFull);
            }
        }

        let booking = &mut state.bookings[index];
        booking.is_confirmed = confirmed;
        Ok(ConfirmationOutcome::Updated(booking.clone()))
    }
}

#[async_trait]
impl ReviewRepository for MemoryStore {
    async fn create_review(&self, review: &CreateReviewRequest) -> Result<Review> {
        let created = Review {
            id: Uuid::new_v4(),
            author: review.author.trim().to_string(),
            email: review.email.trim().to_string(),
            rating: review.rating,
            text: review.text.clone(),
            photo: review.photo.clone(),
            is_public: false,
            status: ReviewStatus::Pending,
            created_at: Utc::now(),
        };

        self.state.lock().await.reviews.push(created.clone());
        Ok(created)
    }

    async fn list_public_reviews(&self, page: PageRequest) -> Result<Page<Review>> {
        let state = self.state.lock().await;
        let mut visible: Vec<Review> = state
            .reviews
            .iter()
            .rev()
            .filter(|review| review.is_publicly_visible())
            .cloned()
            .collect();
        visible.sort_by_key(|review| Reverse(review.created_at));
        Ok(page.slice(visible))
    }

    async fn list_reviews(&self, status: Option<ReviewStatus>) -> Result<Vec<Review>> {
        let state = self.state.lock().await;
        let mut reviews: Vec<Review> = state
            .reviews
            .iter()
            .rev()
            .filter(|review| status.is_none_or(|status| review.status == status))
            .cloned()
            .collect();
        reviews.sort_by_key(|review| Reverse(review.created_at));
        Ok(reviews)
    }

    async fn moderate_reviews(&self, ids: &[Uuid], action: ModerationAction) -> Result<u64> {
        let mut state = self.state.lock().await;
        let mut updated = 0;
        for review in state.reviews.iter_mut().filter(|review| ids.contains(&review.id)) {
            review.apply(action);
            updated += 1;
        }
        Ok(updated)
    }

    async fn create_social_review(
        &self,
        review: &CreateSocialReviewRequest,
    ) -> Result<SocialReview> {
        let mut state = self.state.lock().await;
        if state
            .social_reviews
            .iter()
            .any(|existing| existing.external_id == review.external_id)
        {
            return Err(duplicate("social_reviews_external_id_key", &review.external_id));
        }

        let created = SocialReview {
            id: Uuid::new_v4(),
            source: review.source,
            external_id: review.external_id.clone(),
            author: review.author.clone(),
            text: review.text.clone(),
            rating: review.rating,
            photo_url: review.photo_url.clone(),
            post_url: review.post_url.clone(),
            created_at: review.created_at,
            imported_at: Utc::now(),
        };
        state.social_reviews.push(created.clone());
        Ok(created)
    }

    async fn list_social_reviews(&self) -> Result<Vec<SocialReview>> {
        let state = self.state.lock().await;
        let mut reviews = state.social_reviews.clone();
        reviews.sort_by_key(|review| Reverse(review.created_at));
        Ok(reviews)
    }

    async fn delete_social_review(&self, id: Uuid) -> Result<bool> {
        let mut state = self.state.lock().await;
        let before = state.social_reviews.len();
        state.social_reviews.retain(|review| review.id != id);
        Ok(state.social_reviews.len() < before)
    }
}

#[async_trait]
impl PortfolioRepository for MemoryStore {
    async fn create_shooting_type(
        &self,
        shooting_type: &CreateShootingTypeRequest,
    ) -> Result<ShootingType> {
        let mut state = self.state.lock().await;
        if state
            .shooting_types
            .iter()
            .any(|existing| existing.slug == shooting_type.slug || existing.name == shooting_type.name)
        {
            return Err(duplicate("shooting_types_slug_key", &shooting_type.slug));
        }

        let created = ShootingType {
            id: Uuid::new_v4(),
            name: shooting_type.name.clone(),
            slug: shooting_type.slug.clone(),
            description: shooting_type.description.clone(),
            is_active: shooting_type.is_active,
            sort_order: shooting_type.sort_order,
        };
        state.shooting_types.push(created.clone());
        Ok(created)
    }

    async fn list_shooting_types(&self, active_only: bool) -> Result<Vec<ShootingType>> {
        let state = self.state.lock().await;
        let mut types: Vec<ShootingType> = state
            .shooting_types
            .iter()
            .filter(|shooting_type| !active_only || shooting_type.is_active)
            .cloned()
            .collect();
        types.sort_by(|a, b| (a.sort_order, &a.name).cmp(&(b.sort_order, &b.name)));
        Ok(types)
    }

    async fn get_shooting_type_by_slug(&self, slug: &str) -> Result<Option<ShootingType>> {
        let state = self.state.lock().await;
        Ok(state
            .shooting_types
            .iter()
            .find(|shooting_type| shooting_type.slug == slug)
            .cloned())
    }

    async fn delete_shooting_type(&self, id: Uuid) -> Result<bool> {
        let mut state = self.state.lock().await;
        let before = state.shooting_types.len();
        state.shooting_types.retain(|shooting_type| shooting_type.id != id);
        if state.shooting_types.len() == before {
            return Ok(false);
        }

        for album in state.albums.iter_mut() {
            album.shooting_types.retain(|shooting_type| shooting_type.id != id);
        }
        for video in state.videos.iter_mut() {
            video.shooting_types.retain(|shooting_type| shooting_type.id != id);
        }
        Ok(true)
    }

    async fn create_album(&self, album: &CreateAlbumRequest) -> Result<Album> {
        let mut state = self.state.lock().await;
        if state.albums.iter().any(|existing| existing.slug == album.slug) {
            return Err(duplicate("albums_slug_key", &album.slug));
        }

        let now = Utc::now();
        let created = Album {
            id: Uuid::new_v4(),
            title: album.title.clone(),
            slug: album.slug.clone(),
            description: album.description.clone(),
            cover: album.cover.clone(),
            shooting_types: state.shooting_types_for(&album.shooting_type_ids),
            is_published: album.is_published,
            is_featured: album.is_featured,
            sort_order: album.sort_order,
            created_at: now,
            updated_at: now,
        };
        state.albums.push(created.clone());
        Ok(created)
    }

    async fn update_album(&self, id: Uuid, update: &UpdateAlbumRequest) -> Result<Option<Album>> {
        let mut state = self.state.lock().await;
        let shooting_types = update
            .shooting_type_ids
            .as_ref()
            .map(|ids| state.shooting_types_for(ids));

        let Some(album) = state.albums.iter_mut().find(|album| album.id == id) else {
            return Ok(None);
        };

        if let Some(title) = &update.title {
            album.title = title.clone();
        }
        if let Some(description) = &update.description {
            album.description = description.clone();
        }
        if let Some(cover) = &update.cover {
            album.cover = Some(cover.clone());
        }
        if let Some(shooting_types) = shooting_types {
            album.shooting_types = shooting_types;
        }
        if let Some(is_published) = update.is_published {
            album.is_published = is_published;
        }
        if let Some(is_featured) = update.is_featured {
            album.is_featured = is_featured;
        }
        if let Some(sort_order) = update.sort_order {
            album.sort_order = sort_order;
        }
        album.updated_at = Utc::now();
        Ok(Some(album.clone()))
    }

    async fn delete_album(&self, id: Uuid) -> Result<bool> {
        let mut state = self.state.lock().await;
        let before = state.albums.len();
        state.albums.retain(|album| album.id != id);
        if state.albums.len() == before {
            return Ok(false);
        }

        state.photos.retain(|photo| photo.album_id != id);
        Ok(true)
    }

    async fn get_album(&self, id: Uuid) -> Result<Option<Album>> {
        let state = self.state.lock().await;
        Ok(state.albums.iter().find(|album| album.id == id).cloned())
    }

    async fn list_published_albums(
        &self,
        filter: &AlbumFilter,
        page: PageRequest,
    ) -> Result<Page<Album>> {
        let state = self.state.lock().await;
        let mut albums: Vec<Album> = state
            .albums
            .iter()
            .filter(|album| filter.matches(album))
            .cloned()
            .collect();
        albums.sort_by_key(|album| (album.sort_order, Reverse(album.created_at)));
        Ok(page.slice(albums))
    }

    async fn get_published_album(&self, slug: &str) -> Result<Option<Album>> {
        let state = self.state.lock().await;
        Ok(state
            .albums
            .iter()
            .find(|album| album.slug == slug && album.is_published)
            .cloned())
    }

    async fn list_album_photos(&self, album_id: Uuid) -> Result<Vec<Photo>> {
        let state = self.state.lock().await;
        let mut photos: Vec<Photo> = state
            .photos
            .iter()
            .filter(|photo| photo.album_id == album_id)
            .cloned()
            .collect();
        photos.sort_by_key(|photo| (photo.sort_order, photo.created_at));
        Ok(photos)
    }

    async fn get_photo(&self, id: Uuid) -> Result<Option<Photo>> {
        let state = self.state.lock().await;
        Ok(state.photos.iter().find(|photo| photo.id == id).cloned())
    }

    async fn create_photo(&self, photo: &CreatePhotoRequest) -> Result<Option<Photo>> {
        let mut state = self.state.lock().await;
        if !state.albums.iter().any(|album| album.id == photo.album_id) {
            return Ok(None);
        }

        let created = Photo {
            id: Uuid::new_v4(),
            album_id: photo.album_id,
            image: photo.image.clone(),
            title: photo.title.clone(),
            description: photo.description.clone(),
            sort_order: photo.sort_order,
            created_at: Utc::now(),
            is_cover_candidate: photo.is_cover_candidate,
        };
        state.photos.push(created.clone());
        Ok(Some(created))
    }

    async fn delete_photo(&self, id: Uuid) -> Result<bool> {
        let mut state = self.state.lock().await;
        let before = state.photos.len();
        state.photos.retain(|photo| photo.id != id);
        Ok(state.photos.len() < before)
    }

    async fn list_published_videos(&self, page: PageRequest) -> Result<Page<Video>> {
        let state = self.state.lock().await;
        let mut videos: Vec<Video> = state
            .videos
            .iter()
            .rev()
            .filter(|video| video.is_published)
            .cloned()
            .collect();
        videos.sort_by_key(|video| Reverse(video.created_at));
        Ok(page.slice(videos))
    }

    async fn create_video(&self, video: &CreateVideoRequest) -> Result<Video> {
        let mut state = self.state.lock().await;
        let created = Video {
            id: Uuid::new_v4(),
            title: video.title.clone(),
            video_file: video.video_file.clone(),
            youtube_url: video.youtube_url.clone(),
            thumbnail: video.thumbnail.clone(),
            description: video.description.clone(),
            shooting_types: state.shooting_types_for(&video.shooting_type_ids),
            is_published: video.is_published,
            created_at: Utc::now(),
        };
        state.videos.push(created.clone());
        Ok(created)
    }

    async fn delete_video(&self, id: Uuid) -> Result<bool> {
        let mut state = self.state.lock().await;
        let before = state.videos.len();
        state.videos.retain(|video| video.id != id);
        Ok(state.videos.len() < before)
    }
}

#[async_trait]
impl SiteRepository for MemoryStore {
    async fn load_site_settings(&self) -> Result<SiteSettings> {
        let mut state = self.state.lock().await;
        Ok(state.settings.get_or_insert_with(SiteSettings::default).clone())
    }

    async fn update_site_settings(&self, settings: &SiteSettings) -> Result<SiteSettings> {
        let mut state = self.state.lock().await;
        state.settings = Some(settings.clone());
        Ok(settings.clone())
    }

    async fn list_services(&self, active_only: bool) -> Result<Vec<Service>> {
        let state = self.state.lock().await;
        let mut services: Vec<Service> = state
            .services
            .iter()
            .filter(|service| !active_only || service.is_active)
            .cloned()
            .collect();
        services.sort_by(|a, b| (a.price, &a.name).cmp(&(b.price, &b.name)));
        Ok(services)
    }

    async fn create_service(&self, service: &CreateServiceRequest) -> Result<Service> {
        let created = Service {
            id: Uuid::new_v4(),
            name: service.name.clone(),
            price: service.price,
            description: service.description.clone(),
            is_active: service.is_active,
        };

        self.state.lock().await.services.push(created.clone());
        Ok(created)
    }

    async fn update_service(
        &self,
        id: Uuid,
        update: &UpdateServiceRequest,
    ) -> Result<Option<Service>> {
        let mut state = self.state.lock().await;
        let Some(service) = state.services.iter_mut().find(|service| service.id == id) else {
            return Ok(None);
        };

        update.apply(service);
        Ok(Some(service.clone()))
    }

    async fn delete_service(&self, id: Uuid) -> Result<bool> {
        let mut state = self.state.lock().await;
        let before = state.services.len();
        state.services.retain(|service| service.id != id);
        Ok(state.services.len() < before)
    }
}
