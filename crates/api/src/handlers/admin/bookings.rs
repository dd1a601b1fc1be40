use axum::{
    Json,
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
};
use framed_core::models::booking::{
    AdminBookingResponse, Booking, BulkConfirmRequest, BulkConfirmResponse, SetConfirmedRequest,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{ApiState, booking, middleware::error_handling::AppError};

#[derive(Debug, Deserialize)]
pub struct BookingListQuery {
    pub confirmed: Option<bool>,
}

#[axum::debug_handler]
pub async fn list_bookings(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<BookingListQuery>,
) -> Result<Json<Vec<AdminBookingResponse>>, AppError> {
    let bookings = state.store.list_bookings(query.confirmed).await?;

    Ok(Json(bookings.into_iter().map(AdminBookingResponse::from).collect()))
}

#[axum::debug_handler]
pub async fn set_confirmed(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetConfirmedRequest>,
) -> Result<Json<AdminBookingResponse>, AppError> {
    let booking = booking::set_confirmed(&state, id, payload.confirmed).await?;

    Ok(Json(booking.into()))
}

#[axum::debug_handler]
pub async fn bulk_confirm(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<BulkConfirmRequest>,
) -> Result<Json<BulkConfirmResponse>, AppError> {
    Ok(Json(
        booking::set_confirmed_bulk(&state, &payload.ids, payload.confirmed).await?,
    ))
}

/// Client contacts of every booking as CSV, newest first.
#[axum::debug_handler]
pub async fn export_contacts(
    State(state): State<Arc<ApiState>>,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state.store.list_bookings(None).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"booking-contacts.csv\"",
            ),
        ],
        contacts_csv(&bookings),
    ))
}

pub fn contacts_csv(bookings: &[Booking]) -> String {
    let mut csv = String::from("name,email,phone,confirmation_code,confirmed\n");
    for booking in bookings {
        let row = [
            csv_field(&booking.client_name),
            csv_field(&booking.client_email),
            csv_field(&booking.client_phone),
            csv_field(&booking.confirmation_code),
            booking.is_confirmed.to_string(),
        ];
        csv.push_str(&row.join(","));
        csv.push('\n');
    }
    csv
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use framed_core::models::booking::ShootingCategory;

    #[test]
    fn quotes_fields_with_separators() {
        let booking = Booking {
            id: Uuid::new_v4(),
            time_slot_id: Uuid::new_v4(),
            client_name: "Smith, \"Jo\"".to_string(),
            client_email: "jo@example.com".to_string(),
            client_phone: "+100".to_string(),
            shooting_type: ShootingCategory::Family,
            message: String::new(),
            is_confirmed: true,
            created_at: Utc::now(),
            confirmation_code: "AB12CD34".to_string(),
        };

        let csv = contacts_csv(&[booking]);

        assert_eq!(
            csv,
            "name,email,phone,confirmation_code,confirmed\n\
             \"Smith, \"\"Jo\"\"\",jo@example.com,+100,AB12CD34,true\n"
        );
    }
}
