//! Admin account records.

use serde::{Deserialize, Serialize};

use crate::types::Email;

/// An encoded password hash in PHC string format.
///
/// Hashing and verification live in the site crate; this type only keeps
/// the encoded value out of logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an already encoded hash.
    #[must_use]
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// The encoded PHC string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordHash([REDACTED])")
    }
}

/// An account allowed into the admin panel. Keyed by email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub email: Email,
    pub password_hash: PasswordHash,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl AdminUser {
    /// Name to show in the panel, falling back to the email.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| self.email.as_str())
    }
}

/// Fields to merge into an existing [`AdminUser`]; `None` leaves a field
/// unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminUserUpdate {
    pub email: Option<Email>,
    pub password_hash: Option<PasswordHash>,
    /// `Some(None)` clears the name.
    pub name: Option<Option<String>>,
}

impl AdminUserUpdate {
    /// Merge the present fields into `user`.
    pub fn apply_to(self, user: &mut AdminUser) {
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(hash) = self.password_hash {
            user.password_hash = hash;
        }
        if let Some(name) = self.name {
            user.name = name;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn user() -> AdminUser {
        AdminUser {
            email: Email::from_trusted("admin@noievoi.com"),
            password_hash: PasswordHash::new("$argon2id$v=19$stub"),
            name: Some("Admin User".into()),
        }
    }

    #[test]
    fn test_debug_redacts_hash() {
        let debug = format!("{:?}", user());
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("argon2id"));
    }

    #[test]
    fn test_update_merges_only_present_fields() {
        let mut admin = user();
        AdminUserUpdate {
            password_hash: Some(PasswordHash::new("new")),
            ..AdminUserUpdate::default()
        }
        .apply_to(&mut admin);
        assert_eq!(admin.password_hash.as_str(), "new");
        assert_eq!(admin.name.as_deref(), Some("Admin User"));
        assert_eq!(admin.email.as_str(), "admin@noievoi.com");
    }

    #[test]
    fn test_update_can_clear_name() {
        let mut admin = user();
        AdminUserUpdate {
            name: Some(None),
            ..AdminUserUpdate::default()
        }
        .apply_to(&mut admin);
        assert_eq!(admin.name, None);
        assert_eq!(admin.display_name(), "admin@noievoi.com");
    }

    #[test]
    fn test_serialized_keys() {
        let value = serde_json::to_value(user()).unwrap();
        assert_eq!(value["email"], "admin@noievoi.com");
        assert_eq!(value["passwordHash"], "$argon2id$v=19$stub");
        assert!(value.get("password").is_none());
    }
}
