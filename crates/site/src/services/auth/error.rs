//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] noievoi_core::EmailError),

    /// Invalid credentials (wrong password or user not found).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// An admin with this email already exists.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Password missing or blank.
    #[error("password must not be empty")]
    EmptyPassword,

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}
