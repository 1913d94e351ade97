//! Opaque verification tokens

use rand::Rng;
use sha2::{Digest, Sha256};

/// Number of random bytes in a verification token (64 hex chars)
const TOKEN_BYTES: usize = 32;

/// Generate a fresh random token, hex encoded. Handed to the user only.
pub fn generate_verification_token() -> String {
    let mut rng = rand::thread_rng();
    let bytes: [u8; TOKEN_BYTES] = rng.gen();
    hex::encode(bytes)
}

/// Digest stored in place of the token
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}
