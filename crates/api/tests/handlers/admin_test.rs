use axum::http::{HeaderValue, StatusCode, header::AUTHORIZATION};
use framed_core::models::{
    booking::{AdminBookingResponse, BulkConfirmResponse, NewBooking},
    time_slot::TimeSlotResponse,
};
use framed_db::{BookingRepository, ReservationOutcome, TimeSlotRepository};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

use crate::test_utils::{
    TestContext, booking_request, in_days, operator_auth, seed_slot,
};

async fn reserve(ctx: &TestContext, slot_id: uuid::Uuid) -> framed_core::models::booking::Booking {
    match ctx
        .store
        .reserve_slot(NewBooking::new(slot_id, booking_request()))
        .await
        .unwrap()
    {
        ReservationOutcome::Created(booking) => booking,
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[rstest]
#[case::missing_header(None)]
#[case::wrong_password(Some("Bearer guess"))]
#[case::wrong_scheme(Some("Basic b3BlcmF0b3I="))]
#[tokio::test]
async fn admin_routes_require_the_password(#[case] header: Option<&'static str>) {
    let server = TestContext::new().server();

    let mut request = server.get("/api/admin/bookings");
    if let Some(value) = header {
        request = request.add_header(AUTHORIZATION, HeaderValue::from_static(value));
    }

    request.await.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_is_forbidden_without_a_configured_hash() {
    let server = TestContext::new().without_admin().server();
    let (name, value) = operator_auth();

    server
        .get("/api/admin/slots")
        .add_header(name, value)
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn creates_a_slot() {
    let server = TestContext::new().server();
    let (name, value) = operator_auth();

    let response = server
        .post("/api/admin/slots")
        .add_header(name, value)
        .json(&json!({
            "date_type": "specific",
            "specific_date": in_days(10),
            "start_time": "10:00:00",
            "end_time": "11:30:00",
            "max_bookings": 2
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let slot: TimeSlotResponse = response.json();
    assert_eq!(slot.remaining_capacity, 2);
    assert!(slot.label.ends_with("10:00-11:30"));
}

#[rstest]
#[case::past_date(json!({"specific_date": in_days(-1), "start_time": "10:00:00", "end_time": "11:00:00"}))]
#[case::reversed_times(json!({"specific_date": in_days(1), "start_time": "12:00:00", "end_time": "11:00:00"}))]
#[case::missing_date(json!({"date_type": "specific", "start_time": "10:00:00", "end_time": "11:00:00"}))]
#[case::zero_capacity(json!({"specific_date": in_days(1), "start_time": "10:00:00", "end_time": "11:00:00", "max_bookings": 0}))]
#[tokio::test]
async fn rejects_invalid_slots(#[case] body: serde_json::Value) {
    let server = TestContext::new().server();
    let (name, value) = operator_auth();

    server
        .post("/api/admin/slots")
        .add_header(name, value)
        .json(&body)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn confirming_past_capacity_is_refused() {
    let ctx = TestContext::new();
    let slot = seed_slot(&ctx.store, in_days(3), 10, 1).await;
    let first = reserve(&ctx, slot.id).await;
    let second = reserve(&ctx, slot.id).await;
    let store = ctx.store.clone();
    let server = ctx.server();
    let (name, value) = operator_auth();

    let response = server
        .put(&format!("/api/admin/bookings/{}/confirmation", first.id))
        .add_header(name.clone(), value.clone())
        .json(&json!({ "confirmed": true }))
        .await;
    response.assert_status_ok();
    assert!(response.json::<AdminBookingResponse>().is_confirmed);

    server
        .put(&format!("/api/admin/bookings/{}/confirmation", second.id))
        .add_header(name, value)
        .json(&json!({ "confirmed": true }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let occupancy = store.get_time_slot(slot.id).await.unwrap().unwrap();
    assert_eq!(occupancy.confirmed_count, 1);
}

#[tokio::test]
async fn bulk_confirm_reports_skipped_bookings() {
    let ctx = TestContext::new();
    let slot = seed_slot(&ctx.store, in_days(3), 10, 1).await;
    let first = reserve(&ctx, slot.id).await;
    let second = reserve(&ctx, slot.id).await;
    let missing = uuid::Uuid::new_v4();
    let server = ctx.server();
    let (name, value) = operator_auth();

    let response = server
        .post("/api/admin/bookings/confirm")
        .add_header(name, value)
        .json(&json!({ "ids": [first.id, second.id, missing], "confirmed": true }))
        .await;

    response.assert_status_ok();
    let result: BulkConfirmResponse = response.json();
    assert_eq!(result.updated, 1);
    assert_eq!(result.skipped, vec![second.id, missing]);
}

#[tokio::test]
async fn deleting_a_slot_removes_its_bookings() {
    let ctx = TestContext::new();
    let slot = seed_slot(&ctx.store, in_days(3), 10, 2).await;
    let booking = reserve(&ctx, slot.id).await;
    let store = ctx.store.clone();
    let server = ctx.server();
    let (name, value) = operator_auth();

    server
        .delete(&format!("/api/admin/slots/{}", slot.id))
        .add_header(name.clone(), value.clone())
        .await
        .assert_status(StatusCode::NO_CONTENT);

    assert!(store.get_booking_by_code(&booking.confirmation_code).await.unwrap().is_none());

    server
        .delete(&format!("/api/admin/slots/{}", slot.id))
        .add_header(name, value)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn exports_contacts_as_csv() {
    let ctx = TestContext::new();
    let slot = seed_slot(&ctx.store, in_days(3), 10, 2).await;
    let booking = reserve(&ctx, slot.id).await;
    let server = ctx.server();
    let (name, value) = operator_auth();

    let response = server
        .get("/api/admin/bookings/export")
        .add_header(name, value)
        .await;

    response.assert_status_ok();
    let csv = response.text();
    assert!(csv.starts_with("name,email,phone,confirmation_code,confirmed\n"));
    assert!(csv.contains(&booking.confirmation_code));
}

#[tokio::test]
async fn bulk_availability_toggle() {
    let ctx = TestContext::new();
    let date = in_days(4);
    let first = seed_slot(&ctx.store, date, 10, 1).await;
    let second = seed_slot(&ctx.store, date, 12, 1).await;
    let store = ctx.store.clone();
    let server = ctx.server();
    let (name, value) = operator_auth();

    let response = server
        .post("/api/admin/slots/availability")
        .add_header(name, value)
        .json(&json!({ "ids": [first.id, second.id], "is_available": false }))
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({ "updated": 2 }));
    let slots = store.list_time_slots_for_date(date).await.unwrap();
    assert!(slots.iter().all(|occupancy| !occupancy.slot.is_available));
}
