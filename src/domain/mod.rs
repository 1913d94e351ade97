pub mod booking;
pub mod dj_profile;
pub mod repositories;
pub mod user;
pub mod verification_token;

// Re-export commonly used types
pub use booking::{Booking, BookingRepository, BookingStatus, NewBooking};
pub use dj_profile::{
    DjListing, DjProfile, DjProfileChanges, DjProfileFilter, DjProfileRepository, DjStatus,
    NewDjProfile, Patch, RatingChanges, RatingStats, StatusChange,
};
pub use repositories::{DomainResult, RepositoryProvider};
pub use user::{CreateUserDto, DeletedAccounts, User, UserRepository, UserRole};
pub use verification_token::{VerificationToken, VerificationTokenRepository};

pub use crate::shared::DomainError;
