pub mod booking;
pub mod booking_config;
pub mod listing;
pub mod price;
pub mod timeline;
pub mod user;
