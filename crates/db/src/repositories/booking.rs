use async_trait::async_trait;
use chrono::Utc;
use eyre::Result;
use framed_core::models::booking::{Booking, NewBooking};
use uuid::Uuid;

use super::{BookingRepository, ConfirmationOutcome, PgStore, ReservationOutcome, time_slot::SLOT_COLUMNS};
use crate::models::{DbBooking, DbTimeSlot};

const BOOKING_COLUMNS: &str = "id, time_slot_id, client_name, client_email, client_phone, \
     shooting_type, message, is_confirmed, created_at, confirmation_code";

const CONFIRMED_COUNT: &str =
    "SELECT COUNT(*) FROM bookings WHERE time_slot_id = $1 AND is_confirmed";

#[async_trait]
impl BookingRepository for PgStore {
    async fn reserve_slot(&self, booking: NewBooking) -> Result<ReservationOutcome> {
        let mut tx = self.pool.begin().await?;

        // Serializes concurrent submissions for the same slot until commit.
        let slot = sqlx::query_as::<_, DbTimeSlot>(&format!(
            "SELECT {} FROM time_slots WHERE id = $1 FOR UPDATE",
            SLOT_COLUMNS
        ))
        .bind(booking.time_slot_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(slot) = slot else {
            return Ok(ReservationOutcome::SlotMissing);
        };
        if !slot.is_available {
            return Ok(ReservationOutcome::SlotUnavailable);
        }

        let confirmed = sqlx::query_scalar::<_, i64>(CONFIRMED_COUNT)
            .bind(slot.id)
            .fetch_one(&mut *tx)
            .await?;
        if i64::from(slot.max_bookings) - confirmed <= 0 {
            return Ok(ReservationOutcome::SlotFull);
        }

        let row = sqlx::query_as::<_, DbBooking>(&format!(
            r#"
            INSERT INTO bookings (id, time_slot_id, client_name, client_email, client_phone,
                                  shooting_type, message, is_confirmed, created_at, confirmation_code)
            VALUES ($1, $2, $3, $4, $5, $6, $7, FALSE, $8, $9)
            RETURNING {}
            "#,
            BOOKING_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(booking.time_slot_id)
        .bind(&booking.client_name)
        .bind(&booking.client_email)
        .bind(&booking.client_phone)
        .bind(booking.shooting_type.as_str())
        .bind(&booking.message)
        .bind(Utc::now())
        .bind(&booking.confirmation_code)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!(
            "Booking created: id={}, slot={}, code={}",
            row.id,
            row.time_slot_id,
            row.confirmation_code
        );
        Ok(ReservationOutcome::Created(row.try_into()?))
    }

    async fn get_booking_by_code(&self, code: &str) -> Result<Option<Booking>> {
        let row = sqlx::query_as::<_, DbBooking>(&format!(
            "SELECT {} FROM bookings WHERE confirmation_code = $1",
            BOOKING_COLUMNS
        ))
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Booking::try_from).transpose()
    }

    async fn list_bookings(&self, confirmed: Option<bool>) -> Result<Vec<Booking>> {
        let rows = sqlx::query_as::<_, DbBooking>(&format!(
            r#"
            SELECT {} FROM bookings
            WHERE ($1::BOOLEAN IS NULL OR is_confirmed = $1)
            ORDER BY created_at DESC
            "#,
            BOOKING_COLUMNS
        ))
        .bind(confirmed)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Booking::try_from).collect()
    }

    async fn set_booking_confirmed(
        &self,
        id: Uuid,
        confirmed: bool,
    ) -> Result<ConfirmationOutcome> {
        let mut tx = self.pool.begin().await?;

        let slot_id = sqlx::query_scalar::<_, Uuid>("SELECT time_slot_id FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(slot_id) = slot_id else {
            return Ok(ConfirmationOutcome::BookingMissing);
        };

        let max_bookings = sqlx::query_scalar::<_, i32>(
            "SELECT max_bookings FROM time_slots WHERE id = $1 FOR UPDATE",
        )
        .bind(slot_id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some(max_bookings) = max_bookings else {
            return Ok(ConfirmationOutcome::BookingMissing);
        };

        // Re-read under the lock; the booking may have gone with its slot.
        let current = sqlx::query_as::<_, DbBooking>(&format!(
            "SELECT {} FROM bookings WHERE id = $1",
            BOOKING_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some(current) = current else {
            return Ok(ConfirmationOutcome::BookingMissing);
        };

        if current.is_confirmed == confirmed {
            return Ok(ConfirmationOutcome::Updated(current.try_into()?));
        }

        if confirmed {
            let count = sqlx::query_scalar::<_, i64>(CONFIRMED_COUNT)
                .bind(slot_id)
                .fetch_one(&mut *tx)
                .await?;
            if count >= i64::from(max_bookings) {
                return Ok(ConfirmationOutcome::SlotFull);
            }
        }

        let row = sqlx::query_as::<_, DbBooking>(&format!(
            "UPDATE bookings SET is_confirmed = $2 WHERE id = $1 RETURNING {}",
            BOOKING_COLUMNS
        ))
        .bind(id)
        .bind(confirmed)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(ConfirmationOutcome::Updated(row.try_into()?))
    }
}
