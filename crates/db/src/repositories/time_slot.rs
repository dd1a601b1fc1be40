use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use eyre::Result;
use framed_core::models::time_slot::{DateType, NewTimeSlot, SlotOccupancy, TimeSlot};
use uuid::Uuid;

use super::{PgStore, TimeSlotRepository};
use crate::models::{DbSlotOccupancy, DbTimeSlot};

pub(crate) const SLOT_COLUMNS: &str =
    "id, date_type, specific_date, start_time, end_time, is_available, max_bookings, created_at";

/// Slots joined with their confirmed booking count.
const OCCUPANCY_SELECT: &str = r#"
    SELECT s.id, s.date_type, s.specific_date, s.start_time, s.end_time,
           s.is_available, s.max_bookings, s.created_at,
           COUNT(b.id) FILTER (WHERE b.is_confirmed) AS confirmed_count
    FROM time_slots s
    LEFT JOIN bookings b ON b.time_slot_id = s.id
"#;

const OCCUPANCY_GROUPING: &str = r#"
    GROUP BY s.id
    ORDER BY s.specific_date ASC NULLS LAST, s.start_time ASC
"#;

fn into_occupancies(rows: Vec<DbSlotOccupancy>) -> Result<Vec<SlotOccupancy>> {
    rows.into_iter().map(SlotOccupancy::try_from).collect()
}

#[async_trait]
impl TimeSlotRepository for PgStore {
    async fn create_time_slot(&self, slot: &NewTimeSlot) -> Result<TimeSlot> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        tracing::debug!(
            "Creating time slot: id={}, date_type={}, date={:?}",
            id,
            slot.date_type,
            slot.specific_date
        );

        let row = sqlx::query_as::<_, DbTimeSlot>(&format!(
            r#"
            INSERT INTO time_slots (id, date_type, specific_date, start_time, end_time, is_available, max_bookings, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            SLOT_COLUMNS
        ))
        .bind(id)
        .bind(slot.date_type.as_str())
        .bind(slot.specific_date)
        .bind(slot.start_time)
        .bind(slot.end_time)
        .bind(slot.is_available)
        .bind(slot.max_bookings)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn update_time_slot(&self, id: Uuid, slot: &NewTimeSlot) -> Result<Option<TimeSlot>> {
        let row = sqlx::query_as::<_, DbTimeSlot>(&format!(
            r#"
            UPDATE time_slots
            SET date_type = $2, specific_date = $3, start_time = $4, end_time = $5,
                is_available = $6, max_bookings = $7
            WHERE id = $1
            RETURNING {}
            "#,
            SLOT_COLUMNS
        ))
        .bind(id)
        .bind(slot.date_type.as_str())
        .bind(slot.specific_date)
        .bind(slot.start_time)
        .bind(slot.end_time)
        .bind(slot.is_available)
        .bind(slot.max_bookings)
        .fetch_optional(&self.pool)
        .await?;

        row.map(TimeSlot::try_from).transpose()
    }

    async fn delete_time_slot(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM time_slots WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn get_time_slot(&self, id: Uuid) -> Result<Option<SlotOccupancy>> {
        let row = sqlx::query_as::<_, DbSlotOccupancy>(&format!(
            "{} WHERE s.id = $1 {}",
            OCCUPANCY_SELECT, OCCUPANCY_GROUPING
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(SlotOccupancy::try_from).transpose()
    }

    async fn list_time_slots(&self, date_type: Option<DateType>) -> Result<Vec<SlotOccupancy>> {
        let rows = sqlx::query_as::<_, DbSlotOccupancy>(&format!(
            "{} WHERE ($1::VARCHAR IS NULL OR s.date_type = $1) {}",
            OCCUPANCY_SELECT, OCCUPANCY_GROUPING
        ))
        .bind(date_type.map(|date_type| date_type.as_str()))
        .fetch_all(&self.pool)
        .await?;

        into_occupancies(rows)
    }

    async fn list_time_slots_for_date(&self, date: NaiveDate) -> Result<Vec<SlotOccupancy>> {
        let rows = sqlx::query_as::<_, DbSlotOccupancy>(&format!(
            "{} WHERE s.date_type = 'specific' AND s.specific_date = $1 {}",
            OCCUPANCY_SELECT, OCCUPANCY_GROUPING
        ))
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        into_occupancies(rows)
    }

    async fn set_availability(&self, ids: &[Uuid], is_available: bool) -> Result<u64> {
        let result = sqlx::query("UPDATE time_slots SET is_available = $2 WHERE id = ANY($1)")
            .bind(ids)
            .bind(is_available)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
