/// Operator-only endpoints
pub mod admin;
/// Booking submission and lookup by confirmation code
pub mod bookings;
/// Albums, photos, videos and shooting types
pub mod portfolio;
/// Client reviews
pub mod reviews;
/// Site settings, services and the contact form
pub mod site;
/// Available time slots
pub mod slots;

use serde::Deserialize;

/// `?page=N` on paginated listings.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
}
