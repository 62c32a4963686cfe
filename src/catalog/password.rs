//! File password hashing.
//!
//! Files may carry an optional password gating download and share. The
//! password is stored as an Argon2id PHC hash, never in clear.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand_core::OsRng;

use crate::{Result, StowageError};

/// Hash a file password using Argon2id.
///
/// Returns a PHC-formatted hash string that includes the salt and
/// parameters.
pub fn hash_password(password: &str) -> Result<String> {
    if password.is_empty() {
        return Err(StowageError::Validation(
            "file password must not be empty".to_string(),
        ));
    }

    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| StowageError::Validation(format!("password hashing failed: {e}")))?;

    Ok(hash.to_string())
}

/// Verify a supplied password against a stored PHC hash.
///
/// Fails with [`StowageError::Forbidden`] on mismatch.
pub fn verify_password(password: &str, hash: &str) -> Result<()> {
    let parsed = PasswordHash::new(hash)
        .map_err(|_| StowageError::Validation("invalid password hash format".to_string()))?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| StowageError::Forbidden("wrong password".to_string()))
}
