use chrono::{DateTime, Utc};

use super::UserRole;

/// Fully prepared user row; the password is already hashed.
#[derive(Debug, Clone)]
pub struct CreateUserDto {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub email_verified_at: Option<DateTime<Utc>>,
}
