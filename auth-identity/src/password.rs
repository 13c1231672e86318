//! Password hashing.
//!
//! New hashes use the configured scheme. Verification picks the scheme from
//! the stored hash itself so accounts hashed under a previous setting keep
//! working.

use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

use crate::error::{IdentityError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordScheme {
    Bcrypt { cost: u32 },
    Argon2,
}

impl Default for PasswordScheme {
    fn default() -> Self {
        PasswordScheme::Bcrypt {
            cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl PasswordScheme {
    /// Hash a password with a fresh salt
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::HashingError`] if the underlying hasher fails.
    pub fn hash(self, password: &str) -> Result<String> {
        match self {
            PasswordScheme::Bcrypt { cost } => bcrypt::hash(password, cost)
                .map_err(|e| IdentityError::HashingError(e.to_string())),
            PasswordScheme::Argon2 => {
                let salt = SaltString::generate(&mut OsRng);
                Argon2::default()
                    .hash_password(password.as_bytes(), &salt)
                    .map(|hash| hash.to_string())
                    .map_err(|e| IdentityError::HashingError(e.to_string()))
            }
        }
    }
}

/// Check `password` against a stored bcrypt or argon2 hash
///
/// # Errors
///
/// Returns [`IdentityError::HashingError`] when the stored hash is in neither format.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool> {
    if stored_hash.starts_with("$argon2") {
        let parsed = PasswordHash::new(stored_hash)
            .map_err(|e| IdentityError::HashingError(e.to_string()))?;
        return Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok());
    }

    if stored_hash.starts_with("$2") {
        return bcrypt::verify(password, stored_hash)
            .map_err(|e| IdentityError::HashingError(e.to_string()));
    }

    Err(IdentityError::HashingError(
        "unrecognised password hash format".to_string(),
    ))
}
