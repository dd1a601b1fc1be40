//! # Framed Core
//!
//! Domain types shared by the Framed crates: the booking ledger and slot
//! catalog models, the content catalog records, input validation, and the
//! outbound seams (`Notifier`, `Mailer`) the API server talks to.

pub mod errors;
pub mod models;
pub mod notify;
pub mod validation;
