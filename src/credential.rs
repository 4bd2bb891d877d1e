//! Password hashing.
//!
//! Argon2id with a random 16-byte salt, stored as a PHC string. Verification
//! reads the cost parameters back out of the stored hash, so accounts hashed
//! under an older cost keep working after the configured cost changes.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use rand::Rng;

use crate::config::HashCost;
use crate::error::AuthError;

fn salt() -> Result<SaltString, AuthError> {
    let bytes: [u8; 16] = rand::rng().random();
    SaltString::encode_b64(&bytes).map_err(|e| AuthError::Credential(e.to_string()))
}

fn hasher(cost: HashCost) -> Result<Argon2<'static>, AuthError> {
    let params = Params::new(cost.memory_kib, cost.iterations, 1, None)
        .map_err(|e| AuthError::Credential(e.to_string()))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hash a password under the given cost.
pub fn hash(password: &str, cost: HashCost) -> Result<String, AuthError> {
    let salt = salt()?;
    hasher(cost)?
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AuthError::Credential(e.to_string()))
}

/// Check a password against a stored hash. Malformed hashes never verify.
#[must_use]
pub fn verify(password: &str, hashword: &str) -> bool {
    PasswordHash::new(hashword)
        .ok()
        .as_ref()
        .is_some_and(|hash| Argon2::default().verify_password(password.as_bytes(), hash).is_ok())
}

#[cfg(test)]
#[path = "credential_test.rs"]
mod tests;
