//! Booking aggregate

pub mod model;
pub mod repository;

pub use model::{Booking, BookingStatus, NewBooking};
pub use repository::BookingRepository;
