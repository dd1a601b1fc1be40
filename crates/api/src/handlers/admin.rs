/// Booking confirmation and the contacts export
pub mod bookings;
/// Shooting types, albums, photos, videos, services and site settings
pub mod content;
/// Review moderation and imported social reviews
pub mod reviews;
/// Time slot management
pub mod slots;

use serde::Serialize;

/// Number of rows a bulk action touched.
#[derive(Debug, Serialize)]
pub struct UpdatedResponse {
    pub updated: u64,
}
