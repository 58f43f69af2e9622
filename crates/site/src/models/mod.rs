//! Types held in the visitor's session.

pub mod session;

pub use session::{CurrentAdmin, keys as session_keys};
