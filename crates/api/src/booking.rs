//! Booking workflow shared by the public and administrative handlers.
//!
//! The slot is checked once when it is resolved and again by the store under
//! the slot lock; alerts go out only after the booking is committed.

use chrono::NaiveDate;
use framed_core::{
    errors::{FramedError, FramedResult},
    models::{
        booking::{
            Booking, BookingResponse, BulkConfirmResponse, CreateBookingRequest,
            CreateBookingResponse, NewBooking,
        },
        time_slot::{SlotOccupancy, TimeSlotResponse},
    },
    notify::{BookingAlert, NotificationEvent},
};
use tracing::info;
use uuid::Uuid;

use crate::{ApiState, notifications::notify_best_effort};
use framed_db::{ConfirmationOutcome, ReservationOutcome};

/// Bookable specific-date slots on `date`, ordered by start time.
pub async fn list_available(state: &ApiState, date: NaiveDate) -> FramedResult<Vec<SlotOccupancy>> {
    let slots = state.store.list_time_slots_for_date(date).await?;
    Ok(slots.into_iter().filter(SlotOccupancy::is_bookable).collect())
}

fn slot_not_found(id: Uuid) -> FramedError {
    FramedError::NotFound(format!("Time slot {} not found", id))
}

fn slot_full() -> FramedError {
    FramedError::Validation("This time slot is already fully booked".to_string())
}

/// Resolves a slot that is open for submissions.
pub async fn bookable_slot(state: &ApiState, slot_id: Uuid) -> FramedResult<SlotOccupancy> {
    let occupancy = state
        .store
        .get_time_slot(slot_id)
        .await?
        .filter(|occupancy| occupancy.slot.is_available)
        .ok_or_else(|| slot_not_found(slot_id))?;

    if occupancy.is_fully_booked() {
        return Err(slot_full());
    }
    Ok(occupancy)
}

/// Validates the form, books the slot and fires the booking alert.
///
/// # Errors
///
/// * `FramedError::Validation` for bad input or a slot that filled up
/// * `FramedError::NotFound` for a missing or closed slot
/// * `FramedError::Database` when the insert fails, including a
///   confirmation-code collision (not retried)
pub async fn create_booking(
    state: &ApiState,
    slot_id: Uuid,
    request: CreateBookingRequest,
) -> FramedResult<CreateBookingResponse> {
    request.validate()?;
    let occupancy = bookable_slot(state, slot_id).await?;

    let booking = match state.store.reserve_slot(NewBooking::new(slot_id, request)).await? {
        ReservationOutcome::Created(booking) => booking,
        ReservationOutcome::SlotMissing | ReservationOutcome::SlotUnavailable => {
            return Err(slot_not_found(slot_id));
        }
        ReservationOutcome::SlotFull => return Err(slot_full()),
    };

    info!(
        "Booking {} created for slot {} ({})",
        booking.confirmation_code,
        slot_id,
        occupancy.slot.label()
    );

    let alert = BookingAlert::new(&booking, &occupancy.slot)
        .with_status_url(state.site.base_url.as_deref());
    notify_best_effort(state.notifier.as_ref(), NotificationEvent::BookingCreated(alert)).await;

    Ok(CreateBookingResponse {
        id: booking.id,
        status: booking.status(),
        time_slot: occupancy.slot.label(),
        confirmation_code: booking.confirmation_code,
    })
}

/// Public view of the booking with this confirmation code.
pub async fn lookup_by_code(state: &ApiState, code: &str) -> FramedResult<BookingResponse> {
    let code = code.trim();
    let not_found = || FramedError::NotFound(format!("Booking {} not found", code));

    let booking = state
        .store
        .get_booking_by_code(code)
        .await?
        .ok_or_else(not_found)?;
    let occupancy = state
        .store
        .get_time_slot(booking.time_slot_id)
        .await?
        .ok_or_else(not_found)?;

    Ok(BookingResponse {
        shooting_type_label: booking.shooting_type.label().to_string(),
        status: booking.status(),
        confirmation_code: booking.confirmation_code,
        client_name: booking.client_name,
        shooting_type: booking.shooting_type,
        message: booking.message,
        created_at: booking.created_at,
        time_slot: TimeSlotResponse::from(occupancy),
    })
}

/// Operator toggle. No alert is sent.
///
/// # Errors
///
/// * `FramedError::NotFound` for an unknown booking
/// * `FramedError::Validation` when confirming would overbook the slot
pub async fn set_confirmed(state: &ApiState, id: Uuid, confirmed: bool) -> FramedResult<Booking> {
    match state.store.set_booking_confirmed(id, confirmed).await? {
        ConfirmationOutcome::Updated(booking) => {
            info!("Booking {} confirmed={}", booking.confirmation_code, confirmed);
            Ok(booking)
        }
        ConfirmationOutcome::BookingMissing => {
            Err(FramedError::NotFound(format!("Booking {} not found", id)))
        }
        ConfirmationOutcome::SlotFull => Err(FramedError::Validation(
            "Confirming this booking would exceed the slot's capacity".to_string(),
        )),
    }
}

/// Applies the toggle to each id in turn; refused or unknown ids are reported
/// back instead of aborting the batch.
pub async fn set_confirmed_bulk(
    state: &ApiState,
    ids: &[Uuid],
    confirmed: bool,
) -> FramedResult<BulkConfirmResponse> {
    let mut updated = 0;
    let mut skipped = Vec::new();

    for &id in ids {
        match state.store.set_booking_confirmed(id, confirmed).await? {
            ConfirmationOutcome::Updated(_) => updated += 1,
            ConfirmationOutcome::BookingMissing | ConfirmationOutcome::SlotFull => skipped.push(id),
        }
    }

    Ok(BulkConfirmResponse { updated, skipped })
}
