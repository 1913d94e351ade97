pub mod admin;
pub mod auth;
pub mod bookings;
pub mod dj_profiles;
pub mod health;
pub mod metrics;
pub mod request_id;
