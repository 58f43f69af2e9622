//! Admin credential service.
//!
//! Passwords are hashed with Argon2id and stored as PHC strings.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash as ParsedHash, PasswordHasher, PasswordVerifier, SaltString,
        rand_core::OsRng,
    },
};

use noievoi_core::PasswordHash;

/// Hash a password for storage.
///
/// # Errors
///
/// Returns `AuthError::EmptyPassword` for a blank password and
/// `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<PasswordHash, AuthError> {
    if password.is_empty() {
        return Err(AuthError::EmptyPassword);
    }

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| PasswordHash::new(hash.to_string()))
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored hash.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` if the password does not match or
/// the stored hash cannot be parsed.
pub fn verify_password(password: &str, hash: &PasswordHash) -> Result<(), AuthError> {
    let parsed_hash =
        ParsedHash::new(hash.as_str()).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

/// Whether `password` matches any of `hashes`.
///
/// Argon2 is deliberately slow; async callers run this on a blocking thread.
#[must_use]
pub fn matches_any(password: &str, hashes: &[PasswordHash]) -> bool {
    hashes
        .iter()
        .any(|hash| verify_password(password, hash).is_ok())
}
