//! CLI command implementations.
//!
//! Commands take an open [`ContentStore`] where they can, so tests run
//! them against in-memory storage. Listing commands return their output
//! lines and leave printing to `main`.

pub mod admin;
pub mod chatbot;
pub mod content;
pub mod seed;

use std::path::{Path, PathBuf};

use noievoi_site::services::auth::AuthError;
use noievoi_site::store::{ContentStore, FileStorage, StorageError, StoreError};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// The data directory could not be opened.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The content store failed to load or persist.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A password could not be hashed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Invalid email.
    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    /// User already exists.
    #[error("Admin user already exists with email: {0}")]
    UserExists(String),

    /// No account with the given email.
    #[error("No admin user with email: {0}")]
    UserNotFound(String),

    /// Seeding would overwrite existing data.
    #[error("{} already holds content; pass --force to overwrite it", .0.display())]
    AlreadySeeded(PathBuf),
}

/// Open the content store kept in `data_dir`, seeding any missing data.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or read.
pub fn open_store(data_dir: &Path) -> Result<ContentStore, CliError> {
    let storage = FileStorage::open(data_dir)?;
    Ok(ContentStore::open(Box::new(storage))?)
}
