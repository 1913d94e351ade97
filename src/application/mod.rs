pub mod bookings;
pub mod dj_profiles;
pub mod identity;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod test_support;

pub use bookings::{BookingInput, BookingService};
pub use dj_profiles::{DjProfileService, ListingQuery, ProfileInput, ProfilePatchInput, RatingInput};
pub use identity::{
    authorize, Action, AuthResult, CleanupReport, IdentityService, IdentitySettings, Principal,
    RegisterInput, RegistrationOutcome, VerifiedEmail,
};
pub use ports::{Mailer, VerificationMail};
pub use services::{start_token_sweeper, sweep_expired_tokens};
