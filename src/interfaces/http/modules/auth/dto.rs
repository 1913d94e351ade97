//! Authentication DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::{AuthResult, RegistrationOutcome};
use crate::domain::User;

/// Missing fields deserialize as empty so the service reports them together.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(length(max = 254, message = "email is too long"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(max = 128, message = "password must be at most 128 characters"))]
    pub password: String,
    #[serde(default)]
    #[validate(length(max = 100, message = "name must be at most 100 characters"))]
    pub name: String,
    /// `USER` (default) or `DJ`
    pub role: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub user: UserDto,
    pub token_issued: bool,
    pub email_sent: bool,
    pub message: String,
}

impl From<RegistrationOutcome> for RegisterResponse {
    fn from(outcome: RegistrationOutcome) -> Self {
        Self {
            user: outcome.user.into(),
            token_issued: outcome.token_issued,
            email_sent: outcome.email_sent,
            message: outcome.message.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserDto,
}

impl From<AuthResult> for LoginResponse {
    fn from(auth: AuthResult) -> Self {
        Self {
            token: auth.token,
            token_type: auth.token_type,
            expires_in: auth.expires_in,
            user: auth.user.into(),
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct VerifyEmailQuery {
    /// Token from the verification link
    pub token: Option<String>,
}

/// Account as exposed over the API; never carries the password hash.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub name: Option<String>,
    pub email: String,
    pub role: String,
    pub email_verified: bool,
    pub email_verified_at: Option<DateTime<Utc>>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            email_verified: u.is_email_verified(),
            role: u.role.as_str().to_string(),
            id: u.id,
            name: u.name,
            email: u.email,
            email_verified_at: u.email_verified_at,
            image: u.image,
            created_at: u.created_at,
        }
    }
}
