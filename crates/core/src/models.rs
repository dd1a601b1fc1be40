pub mod booking;
pub mod pagination;
pub mod portfolio;
pub mod review;
pub mod site;
pub mod time_slot;
