/// Operator endpoints behind the password check
pub mod admin;
/// Booking submission and status lookup
pub mod bookings;
/// Liveness and readiness probes
pub mod health;
/// Gallery, videos and shooting types
pub mod portfolio;
/// Client and social reviews
pub mod reviews;
/// Site settings, services and contact form
pub mod site;
/// Public slot listing
pub mod slots;
