use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use fake::{
    Fake,
    faker::{internet::en::SafeEmail, name::en::Name},
};
use framed_core::models::{
    booking::{CreateBookingRequest, NewBooking, ShootingCategory},
    pagination::PageRequest,
    portfolio::{AlbumFilter, CreateAlbumRequest, CreatePhotoRequest, CreateShootingTypeRequest},
    review::{CreateReviewRequest, ModerationAction, ReviewStatus},
    time_slot::{DateType, NewTimeSlot},
};
use framed_db::{
    BookingRepository, ConfirmationOutcome, PortfolioRepository, ReservationOutcome,
    ReviewRepository, SiteRepository, TimeSlotRepository, mock::MemoryStore,
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use uuid::Uuid;

fn time(h: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, 0, 0).unwrap()
}

fn in_days(days: i64) -> NaiveDate {
    Utc::now().date_naive() + Duration::days(days)
}

fn new_slot(date: Option<NaiveDate>, start: u32, max_bookings: i32) -> NewTimeSlot {
    NewTimeSlot {
        date_type: if date.is_some() {
            DateType::Specific
        } else {
            DateType::Weekend
        },
        specific_date: date,
        start_time: time(start),
        end_time: time(start + 1),
        is_available: true,
        max_bookings,
    }
}

fn new_booking(slot_id: Uuid) -> NewBooking {
    NewBooking::new(
        slot_id,
        CreateBookingRequest {
            client_name: Name().fake(),
            client_email: SafeEmail().fake(),
            client_phone: "+7 900 000-00-00".to_string(),
            shooting_type: ShootingCategory::Portrait,
            message: String::new(),
        },
    )
}

async fn reserve(store: &MemoryStore, slot_id: Uuid) -> framed_core::models::booking::Booking {
    match store.reserve_slot(new_booking(slot_id)).await.unwrap() {
        ReservationOutcome::Created(booking) => booking,
        other => panic!("Expected a booking, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_slots_are_ordered_by_date_then_start() {
    let store = MemoryStore::new();
    store.create_time_slot(&new_slot(None, 9, 1)).await.unwrap();
    store.create_time_slot(&new_slot(Some(in_days(2)), 14, 1)).await.unwrap();
    store.create_time_slot(&new_slot(Some(in_days(1)), 16, 1)).await.unwrap();
    store.create_time_slot(&new_slot(Some(in_days(2)), 10, 1)).await.unwrap();

    let listed = store.list_time_slots(None).await.unwrap();
    let order: Vec<(Option<NaiveDate>, NaiveTime)> = listed
        .iter()
        .map(|o| (o.slot.specific_date, o.slot.start_time))
        .collect();

    assert_eq!(
        order,
        vec![
            (Some(in_days(1)), time(16)),
            (Some(in_days(2)), time(10)),
            (Some(in_days(2)), time(14)),
            (None, time(9)),
        ]
    );

    let weekends = store.list_time_slots(Some(DateType::Weekend)).await.unwrap();
    assert_eq!(weekends.len(), 1);

    let on_day = store.list_time_slots_for_date(in_days(2)).await.unwrap();
    assert_eq!(on_day.len(), 2);
}

#[rstest]
#[case::missing(false, true, ReservationOutcome::SlotMissing)]
#[case::unavailable(true, false, ReservationOutcome::SlotUnavailable)]
#[tokio::test]
async fn test_reserve_refuses_closed_slots(
    #[case] exists: bool,
    #[case] available: bool,
    #[case] expected: ReservationOutcome,
) {
    let store = MemoryStore::new();
    let mut draft = new_slot(Some(in_days(3)), 10, 1);
    draft.is_available = available;
    let slot = store.create_time_slot(&draft).await.unwrap();
    let slot_id = if exists { slot.id } else { Uuid::new_v4() };

    let outcome = store.reserve_slot(new_booking(slot_id)).await.unwrap();

    assert_eq!(outcome, expected);
}

#[tokio::test]
async fn test_reserve_creates_unconfirmed_booking_with_code() {
    let store = MemoryStore::new();
    let slot = store.create_time_slot(&new_slot(Some(in_days(3)), 10, 1)).await.unwrap();

    let booking = reserve(&store, slot.id).await;

    assert!(!booking.is_confirmed);
    assert_eq!(booking.confirmation_code.len(), 8);
    let found = store
        .get_booking_by_code(&booking.confirmation_code)
        .await
        .unwrap();
    assert_eq!(found, Some(booking));
}

#[tokio::test]
async fn test_confirmation_counts_toward_capacity() {
    let store = MemoryStore::new();
    let slot = store.create_time_slot(&new_slot(Some(in_days(3)), 10, 2)).await.unwrap();
    let first = reserve(&store, slot.id).await;
    let second = reserve(&store, slot.id).await;

    // Unconfirmed bookings do not consume capacity.
    let occupancy = store.get_time_slot(slot.id).await.unwrap().unwrap();
    assert_eq!(occupancy.remaining_capacity(), 2);

    store.set_booking_confirmed(first.id, true).await.unwrap();
    let occupancy = store.get_time_slot(slot.id).await.unwrap().unwrap();
    assert_eq!(occupancy.confirmed_count, 1);
    assert_eq!(occupancy.remaining_capacity(), 1);

    store.set_booking_confirmed(second.id, true).await.unwrap();
    let occupancy = store.get_time_slot(slot.id).await.unwrap().unwrap();
    assert_eq!(occupancy.remaining_capacity(), 0);
    assert!(occupancy.is_fully_booked());

    // A full slot takes no further submissions.
    let outcome = store.reserve_slot(new_booking(slot.id)).await.unwrap();
    assert_eq!(outcome, ReservationOutcome::SlotFull);

    store.set_booking_confirmed(first.id, false).await.unwrap();
    let occupancy = store.get_time_slot(slot.id).await.unwrap().unwrap();
    assert_eq!(occupancy.remaining_capacity(), 1);
}

#[tokio::test]
async fn test_confirmation_toggles_keep_the_code() {
    let store = MemoryStore::new();
    let slot = store.create_time_slot(&new_slot(Some(in_days(1)), 10, 1)).await.unwrap();
    let booking = reserve(&store, slot.id).await;
    let code = booking.confirmation_code.clone();

    for confirmed in [true, false, true] {
        match store.set_booking_confirmed(booking.id, confirmed).await.unwrap() {
            ConfirmationOutcome::Updated(updated) => assert_eq!(updated.confirmation_code, code),
            other => panic!("Expected an update, got: {:?}", other),
        }
    }

    let found = store.get_booking_by_code(&code).await.unwrap().unwrap();
    assert_eq!(found.id, booking.id);
    assert_eq!(found.confirmation_code, code);
    assert!(found.is_confirmed);
}

#[tokio::test]
async fn test_confirming_past_capacity_is_refused() {
    let store = MemoryStore::new();
    let slot = store.create_time_slot(&new_slot(Some(in_days(3)), 10, 1)).await.unwrap();
    let first = reserve(&store, slot.id).await;
    let second = reserve(&store, slot.id).await;

    let confirmed = store.set_booking_confirmed(first.id, true).await.unwrap();
    assert!(matches!(confirmed, ConfirmationOutcome::Updated(ref b) if b.is_confirmed));

    // Re-confirming is a no-op.
    let again = store.set_booking_confirmed(first.id, true).await.unwrap();
    assert!(matches!(again, ConfirmationOutcome::Updated(_)));

    let refused = store.set_booking_confirmed(second.id, true).await.unwrap();
    assert_eq!(refused, ConfirmationOutcome::SlotFull);

    let missing = store.set_booking_confirmed(Uuid::new_v4(), true).await.unwrap();
    assert_eq!(missing, ConfirmationOutcome::BookingMissing);
}

#[tokio::test]
async fn test_concurrent_confirmations_fill_single_seat_once() {
    let store = Arc::new(MemoryStore::new());
    let slot = store.create_time_slot(&new_slot(Some(in_days(3)), 10, 1)).await.unwrap();

    let mut ids = Vec::new();
    for _ in 0..8 {
        ids.push(reserve(&store, slot.id).await.id);
    }

    let handles: Vec<_> = ids
        .into_iter()
        .map(|id| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.set_booking_confirmed(id, true).await.unwrap() })
        })
        .collect();

    let mut updated = 0;
    for handle in handles {
        if let ConfirmationOutcome::Updated(_) = handle.await.unwrap() {
            updated += 1;
        }
    }

    assert_eq!(updated, 1);
    let occupancy = store.get_time_slot(slot.id).await.unwrap().unwrap();
    assert_eq!(occupancy.confirmed_count, 1);
}

#[tokio::test]
async fn test_deleting_slot_cascades_to_bookings() {
    let store = MemoryStore::new();
    let slot = store.create_time_slot(&new_slot(Some(in_days(3)), 10, 1)).await.unwrap();
    let booking = reserve(&store, slot.id).await;

    assert!(store.delete_time_slot(slot.id).await.unwrap());
    assert!(!store.delete_time_slot(slot.id).await.unwrap());

    assert!(store
        .get_booking_by_code(&booking.confirmation_code)
        .await
        .unwrap()
        .is_none());
    assert!(store.list_bookings(None).await.unwrap().is_empty());
    assert_eq!(
        store.set_booking_confirmed(booking.id, true).await.unwrap(),
        ConfirmationOutcome::BookingMissing
    );
}

#[tokio::test]
async fn test_set_availability_counts_updates() {
    let store = MemoryStore::new();
    let a = store.create_time_slot(&new_slot(Some(in_days(3)), 10, 1)).await.unwrap();
    let b = store.create_time_slot(&new_slot(Some(in_days(3)), 12, 1)).await.unwrap();

    let updated = store
        .set_availability(&[a.id, b.id, Uuid::new_v4()], false)
        .await
        .unwrap();

    assert_eq!(updated, 2);
    let listed = store.list_time_slots(None).await.unwrap();
    assert!(listed.iter().all(|o| !o.slot.is_available));
}

#[tokio::test]
async fn test_reviews_need_approval_and_publication() {
    let store = MemoryStore::new();
    let review = store
        .create_review(&CreateReviewRequest {
            author: "Olga".to_string(),
            email: "olga@example.com".to_string(),
            rating: 5,
            text: "Lovely photos".to_string(),
            photo: None,
        })
        .await
        .unwrap();
    assert_eq!(review.status, ReviewStatus::Pending);
    assert!(!review.is_public);

    let page = PageRequest::new(None, 10);
    assert_eq!(store.list_public_reviews(page).await.unwrap().total, 0);

    store
        .moderate_reviews(&[review.id], ModerationAction::Approve)
        .await
        .unwrap();
    assert_eq!(store.list_public_reviews(page).await.unwrap().total, 0);

    store
        .moderate_reviews(&[review.id], ModerationAction::Publish)
        .await
        .unwrap();
    let listed = store.list_public_reviews(page).await.unwrap();
    assert_eq!(listed.total, 1);
    assert_eq!(listed.items[0].id, review.id);

    let approved = store
        .list_reviews(Some(ReviewStatus::Approved))
        .await
        .unwrap();
    assert_eq!(approved.len(), 1);
}

#[tokio::test]
async fn test_album_gallery_filters_and_cascades() {
    let store = MemoryStore::new();
    let wedding = store
        .create_shooting_type(&CreateShootingTypeRequest {
            name: "Wedding".to_string(),
            slug: "wedding".to_string(),
            description: String::new(),
            is_active: true,
            sort_order: 0,
        })
        .await
        .unwrap();

    let album = |title: &str, slug: &str, types: Vec<Uuid>| CreateAlbumRequest {
        title: title.to_string(),
        slug: slug.to_string(),
        description: String::new(),
        cover: None,
        shooting_type_ids: types,
        is_published: true,
        is_featured: false,
        sort_order: 0,
    };

    let summer = store
        .create_album(&album("Summer Wedding", "summer-wedding", vec![wedding.id]))
        .await
        .unwrap();
    store
        .create_album(&album("Autumn Walk", "autumn-walk", vec![]))
        .await
        .unwrap();

    // Slugs are unique.
    assert!(store
        .create_album(&album("Copy", "autumn-walk", vec![]))
        .await
        .is_err());

    let filter = AlbumFilter {
        shooting_type: Some("wedding".to_string()),
        ..Default::default()
    };
    let page = store
        .list_published_albums(&filter, PageRequest::new(None, 12))
        .await
        .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, summer.id);

    let photo = store
        .create_photo(&CreatePhotoRequest {
            album_id: summer.id,
            image: "photos/1.jpg".to_string(),
            title: String::new(),
            description: String::new(),
            sort_order: 0,
            is_cover_candidate: false,
        })
        .await
        .unwrap()
        .unwrap();

    assert!(store.delete_album(summer.id).await.unwrap());
    assert!(store.get_photo(photo.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_site_settings_default_on_first_load() {
    let store = MemoryStore::new();

    let settings = store.load_site_settings().await.unwrap();

    assert_eq!(settings.title, "Photographer");
}
