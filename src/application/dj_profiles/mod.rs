//! DJ profile use-cases

pub mod input;
pub mod service;

pub use input::{ProfileInput, ProfilePatchInput};
pub use service::{DjProfileService, ListingQuery, RatingInput};
