use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    errors::{FramedError, FramedResult},
    models::time_slot::TimeSlotResponse,
    validation::{require_text, validate_email},
};

/// Length of the public booking token.
pub const CONFIRMATION_CODE_LEN: usize = 8;

/// Mints a confirmation code: the first eight characters of a random v4 UUID,
/// upper-cased. Uniqueness is left to the storage layer's unique constraint.
pub fn generate_confirmation_code() -> String {
    Uuid::new_v4().to_string()[..CONFIRMATION_CODE_LEN].to_uppercase()
}

/// Kind of photo session a client asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShootingCategory {
    #[default]
    Portrait,
    Lovestory,
    Family,
    Other,
}

impl ShootingCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShootingCategory::Portrait => "portrait",
            ShootingCategory::Lovestory => "lovestory",
            ShootingCategory::Family => "family",
            ShootingCategory::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ShootingCategory::Portrait => "Portrait session",
            ShootingCategory::Lovestory => "Love Story",
            ShootingCategory::Family => "Family session",
            ShootingCategory::Other => "Other",
        }
    }
}

impl fmt::Display for ShootingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShootingCategory {
    type Err = FramedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "portrait" => Ok(ShootingCategory::Portrait),
            "lovestory" => Ok(ShootingCategory::Lovestory),
            "family" => Ok(ShootingCategory::Family),
            "other" => Ok(ShootingCategory::Other),
            other => Err(FramedError::Validation(format!(
                "Unknown shooting type: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub time_slot_id: Uuid,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    pub shooting_type: ShootingCategory,
    pub message: String,
    pub is_confirmed: bool,
    pub created_at: DateTime<Utc>,
    pub confirmation_code: String,
}

impl Booking {
    pub fn status(&self) -> BookingStatus {
        if self.is_confirmed {
            BookingStatus::Confirmed
        } else {
            BookingStatus::Pending
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
}

/// Public booking form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    #[serde(default)]
    pub shooting_type: ShootingCategory,
    #[serde(default)]
    pub message: String,
}

impl CreateBookingRequest {
    pub fn validate(&self) -> FramedResult<()> {
        require_text("Client name", &self.client_name, 100)?;
        validate_email("Client email", &self.client_email)?;
        require_text("Client phone", &self.client_phone, 20)?;
        Ok(())
    }
}

/// A booking ready to be written: validated input plus a freshly minted code.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub time_slot_id: Uuid,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    pub shooting_type: ShootingCategory,
    pub message: String,
    pub confirmation_code: String,
}

impl NewBooking {
    pub fn new(time_slot_id: Uuid, request: CreateBookingRequest) -> Self {
        Self {
            time_slot_id,
            client_name: request.client_name.trim().to_string(),
            client_email: request.client_email.trim().to_string(),
            client_phone: request.client_phone.trim().to_string(),
            shooting_type: request.shooting_type,
            message: request.message,
            confirmation_code: generate_confirmation_code(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingResponse {
    pub id: Uuid,
    pub confirmation_code: String,
    pub status: BookingStatus,
    pub time_slot: String,
}

/// What the "thank you" and status pages show for a confirmation code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingResponse {
    pub confirmation_code: String,
    pub client_name: String,
    pub shooting_type: ShootingCategory,
    pub shooting_type_label: String,
    pub message: String,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub time_slot: TimeSlotResponse,
}

/// Operator view of a booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminBookingResponse {
    pub id: Uuid,
    pub time_slot_id: Uuid,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    pub shooting_type: ShootingCategory,
    pub message: String,
    pub is_confirmed: bool,
    pub created_at: DateTime<Utc>,
    pub confirmation_code: String,
}

impl From<Booking> for AdminBookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            time_slot_id: booking.time_slot_id,
            client_name: booking.client_name,
            client_email: booking.client_email,
            client_phone: booking.client_phone,
            shooting_type: booking.shooting_type,
            message: booking.message,
            is_confirmed: booking.is_confirmed,
            created_at: booking.created_at,
            confirmation_code: booking.confirmation_code,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetConfirmedRequest {
    pub confirmed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkConfirmRequest {
    pub ids: Vec<Uuid>,
    pub confirmed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkConfirmResponse {
    pub updated: usize,
    /// Bookings left untouched because they no longer exist or their slot is full.
    pub skipped: Vec<Uuid>,
}
