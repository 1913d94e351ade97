//! DJ profile aggregate
//!
//! Contains the DjProfile entity, its verification status, create/patch
//! DTOs, listing filter and the repository interface.

pub mod model;
pub mod repository;

mod dto_create;
mod dto_filter;
mod dto_update;

pub use model::{DjListing, DjProfile, DjStatus, RatingStats};

pub use dto_create::NewDjProfile;
pub use dto_filter::DjProfileFilter;
pub use dto_update::{DjProfileChanges, Patch, RatingChanges, StatusChange};

pub use repository::DjProfileRepository;
