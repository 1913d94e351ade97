//! Credential primitives: JWT, bcrypt and opaque token digests

pub mod jwt;
pub mod password;
pub mod token;

pub use jwt::{create_token, verify_token, JwtConfig, TokenClaims};
pub use password::{hash_password, verify_password};
pub use token::{generate_verification_token, hash_token};
