//! Business logic services for the site.
//!
//! - `auth` - Admin password hashing and verification
//! - `upload` - Image upload validation and encoding

pub mod auth;
pub mod upload;
