//! Booking module — create and list the caller's booking requests

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
