//! Admin module — DJ review, status and ratings, account maintenance

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
