//! Email verification token aggregate

pub mod model;
pub mod repository;

pub use model::VerificationToken;
pub use repository::VerificationTokenRepository;
