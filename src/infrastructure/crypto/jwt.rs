//! JWT Token handling

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::{User, UserRole};

pub const ISSUER: &str = "mixfactory";

/// JWT configuration
#[derive(Clone, Debug)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Token expiration time in hours
    pub expiration_hours: i64,
    /// Issuer claim
    pub issuer: String,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, expiration_hours: i64) -> Self {
        Self {
            secret: secret.into(),
            expiration_hours,
            issuer: ISSUER.to_string(),
        }
    }

    pub fn expires_in_secs(&self) -> i64 {
        self.expiration_hours * 3600
    }
}

/// JWT TokenClaims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TokenClaims {
    /// Subject (user ID)
    pub sub: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    pub role: UserRole,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Issuer
    pub iss: String,
}

impl TokenClaims {
    pub fn for_user(user: &User, config: &JwtConfig) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(config.expiration_hours);

        Self {
            sub: user.id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: config.issuer.clone(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Create a JWT token for a user
pub fn create_token(user: &User, config: &JwtConfig) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = TokenClaims::for_user(user, config);

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify and decode a JWT token
pub fn verify_token(
    token: &str,
    config: &JwtConfig,
) -> Result<TokenClaims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.set_issuer(&[&config.issuer]);

    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: UserRole) -> User {
        let now = Utc::now();
        User {
            id: "user-1".into(),
            name: Some("Dana".into()),
            email: "dana@example.com".into(),
            email_verified_at: Some(now),
            password_hash: None,
            image: None,
            role,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn token_round_trip_keeps_typed_role() {
        let config = JwtConfig::new("test-secret", 1);
        let token = create_token(&user(UserRole::Admin), &config).unwrap();
        let claims = verify_token(&token, &config).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.role, UserRole::Admin);
        assert!(claims.is_admin());
        assert_eq!(claims.iss, ISSUER);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = create_token(&user(UserRole::Dj), &JwtConfig::new("a", 1)).unwrap();
        assert!(verify_token(&token, &JwtConfig::new("b", 1)).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let config = JwtConfig::new("test-secret", -2);
        let token = create_token(&user(UserRole::User), &config).unwrap();
        assert!(verify_token(&token, &config).is_err());
    }
}
