//! DJ profile module — own profile, public profile and directory listing

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
