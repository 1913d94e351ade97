//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::repositories::RepositoryProvider;
use crate::domain::{
    BookingRepository, DjProfileRepository, UserRepository, VerificationTokenRepository,
};

use super::booking_repository::SeaOrmBookingRepository;
use super::dj_profile_repository::SeaOrmDjProfileRepository;
use super::user_repository::SeaOrmUserRepository;
use super::verification_token_repository::SeaOrmVerificationTokenRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let user = repos.users().find_by_email("dj@example.com").await?;
/// let bookings = repos.bookings().list_for_user(&user.id, None).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    users: SeaOrmUserRepository,
    dj_profiles: SeaOrmDjProfileRepository,
    bookings: SeaOrmBookingRepository,
    verification_tokens: SeaOrmVerificationTokenRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: SeaOrmUserRepository::new(db.clone()),
            dj_profiles: SeaOrmDjProfileRepository::new(db.clone()),
            bookings: SeaOrmBookingRepository::new(db.clone()),
            verification_tokens: SeaOrmVerificationTokenRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn dj_profiles(&self) -> &dyn DjProfileRepository {
        &self.dj_profiles
    }

    fn bookings(&self) -> &dyn BookingRepository {
        &self.bookings
    }

    fn verification_tokens(&self) -> &dyn VerificationTokenRepository {
        &self.verification_tokens
    }
}
