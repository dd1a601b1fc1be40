use axum::http::StatusCode;
use framed_core::{
    models::{
        booking::{BookingResponse, BookingStatus, CreateBookingResponse, NewBooking},
        time_slot::TimeSlotResponse,
    },
    notify::NotificationEvent,
};
use framed_db::{BookingRepository, ReservationOutcome, TimeSlotRepository};
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

use crate::test_utils::{BASE_URL, TestContext, booking_request, in_days, seed_slot};

#[tokio::test]
async fn lists_only_bookable_slots_for_the_date() {
    let ctx = TestContext::new();
    let date = in_days(3);
    let morning = seed_slot(&ctx.store, date, 10, 1).await;
    let closed = seed_slot(&ctx.store, date, 12, 1).await;
    let full = seed_slot(&ctx.store, date, 14, 1).await;
    seed_slot(&ctx.store, in_days(4), 10, 1).await;
    ctx.store.set_availability(&[closed.id], false).await.unwrap();
    let taken = match ctx
        .store
        .reserve_slot(NewBooking::new(full.id, booking_request()))
        .await
        .unwrap()
    {
        ReservationOutcome::Created(booking) => booking,
        other => panic!("Expected a booking, got: {:?}", other),
    };
    ctx.store.set_booking_confirmed(taken.id, true).await.unwrap();
    let server = ctx.server();

    let response = server
        .get("/api/slots")
        .add_query_param("date", date)
        .await;

    response.assert_status_ok();
    let slots: Vec<TimeSlotResponse> = response.json();
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].id, morning.id);
    assert!(slots.iter().all(|slot| slot.id != full.id));
    assert_eq!(slots[0].remaining_capacity, 1);
}

#[tokio::test]
async fn booking_returns_code_and_sends_alert() {
    let mut ctx = TestContext::new();
    let slot = seed_slot(&ctx.store, in_days(2), 15, 2).await;
    ctx.notifier
        .expect_notify()
        .withf(|event| match event {
            NotificationEvent::BookingCreated(alert) => alert
                .status_url
                .as_deref()
                .is_some_and(|url| url.starts_with(BASE_URL)),
            _ => false,
        })
        .times(1)
        .returning(|_| Ok(()));
    let store = ctx.store.clone();
    let server = ctx.server();

    let response = server
        .post(&format!("/api/slots/{}/bookings", slot.id))
        .json(&booking_request())
        .await;

    response.assert_status(StatusCode::CREATED);
    let created: CreateBookingResponse = response.json();
    assert_eq!(created.confirmation_code.len(), 8);
    assert_eq!(created.status, BookingStatus::Pending);

    let stored = store
        .get_booking_by_code(&created.confirmation_code)
        .await
        .unwrap()
        .unwrap();
    assert!(!stored.is_confirmed);
    assert_eq!(stored.time_slot_id, slot.id);
}

#[tokio::test]
async fn booking_survives_a_failing_notifier() {
    let mut ctx = TestContext::new();
    let slot = seed_slot(&ctx.store, in_days(2), 9, 1).await;
    ctx.notifier
        .expect_notify()
        .times(1)
        .returning(|_| Err(eyre::eyre!("telegram is down")));
    let server = ctx.server();

    let response = server
        .post(&format!("/api/slots/{}/bookings", slot.id))
        .json(&booking_request())
        .await;

    response.assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn status_page_shows_booking_by_code() {
    let ctx = TestContext::new().quiet_notifier();
    let slot = seed_slot(&ctx.store, in_days(5), 11, 1).await;
    let server = ctx.server();

    let created: CreateBookingResponse = server
        .post(&format!("/api/slots/{}/bookings", slot.id))
        .json(&booking_request())
        .await
        .json();

    let response = server
        .get(&format!("/api/bookings/{}", created.confirmation_code))
        .await;

    response.assert_status_ok();
    let booking: BookingResponse = response.json();
    assert_eq!(booking.confirmation_code, created.confirmation_code);
    assert_eq!(booking.shooting_type_label, "Love Story");
    assert_eq!(booking.status, BookingStatus::Pending);
    assert_eq!(booking.time_slot.id, slot.id);
}

#[tokio::test]
async fn unknown_code_is_not_found() {
    let server = TestContext::new().server();

    server
        .get("/api/bookings/ZZZZ9999")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn full_slot_refuses_new_bookings() {
    let ctx = TestContext::new();
    let slot = seed_slot(&ctx.store, in_days(1), 14, 1).await;
    let store = ctx.store.clone();
    let server = ctx.server();

    let booking = match store
        .reserve_slot(framed_core::models::booking::NewBooking::new(slot.id, booking_request()))
        .await
        .unwrap()
    {
        framed_db::ReservationOutcome::Created(booking) => booking,
        other => panic!("unexpected outcome: {:?}", other),
    };
    store.set_booking_confirmed(booking.id, true).await.unwrap();

    let response = server
        .post(&format!("/api/slots/{}/bookings", slot.id))
        .json(&booking_request())
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(store.list_time_slots_for_date(in_days(1)).await.unwrap()[0].is_fully_booked());
}

#[tokio::test]
async fn closed_or_missing_slots_are_not_found() {
    let ctx = TestContext::new();
    let slot = seed_slot(&ctx.store, in_days(1), 10, 3).await;
    ctx.store.set_availability(&[slot.id], false).await.unwrap();
    let server = ctx.server();

    for id in [slot.id, Uuid::new_v4()] {
        server
            .post(&format!("/api/slots/{}/bookings", id))
            .json(&booking_request())
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn invalid_form_sends_no_alert() {
    let mut ctx = TestContext::new();
    let slot = seed_slot(&ctx.store, in_days(1), 10, 1).await;
    ctx.notifier.expect_notify().times(0);
    let store = ctx.store.clone();
    let server = ctx.server();

    let response = server
        .post(&format!("/api/slots/{}/bookings", slot.id))
        .json(&json!({
            "client_name": "Anna",
            "client_email": "not-an-email",
            "client_phone": "+79001234567"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(store.list_bookings(None).await.unwrap().is_empty());
}
