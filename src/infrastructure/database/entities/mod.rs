//! Database entities module

pub mod user;
pub mod booking;
pub mod dj_profile;
pub mod email_verification_token;

pub use user::Entity as User;
pub use booking::Entity as Booking;
pub use dj_profile::Entity as DjProfile;
pub use email_verification_token::Entity as EmailVerificationToken;
