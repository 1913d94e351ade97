//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod booking_repository;
pub mod dj_profile_repository;
pub mod repository_provider;
pub mod user_repository;
pub mod verification_token_repository;

pub use booking_repository::SeaOrmBookingRepository;
pub use dj_profile_repository::SeaOrmDjProfileRepository;
pub use repository_provider::SeaOrmRepositoryProvider;
pub use user_repository::SeaOrmUserRepository;
pub use verification_token_repository::SeaOrmVerificationTokenRepository;
