//! Password hashing utilities

use bcrypt::{hash, verify};

pub use bcrypt::DEFAULT_COST;

/// Hash a password using bcrypt with the given work factor
pub fn hash_password(password: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    hash(password, cost)
}

/// Verify a password against a hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    verify(password, hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_only_the_original_password() {
        let hashed = hash_password("secret1", 4).unwrap();
        assert_ne!(hashed, "secret1");
        assert!(verify_password("secret1", &hashed).unwrap());
        assert!(!verify_password("secret2", &hashed).unwrap());
    }
}
