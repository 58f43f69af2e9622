//! Admin user management commands.
//!
//! # Usage
//!
//! ```bash
//! noievoi-cli admin create -e ops@noievoi.com -p s3cret -n "Ops"
//! noievoi-cli admin delete -e ops@noievoi.com
//! ```

use noievoi_core::{AdminUser, Email};
use noievoi_site::services::auth::hash_password;
use noievoi_site::store::ContentStore;
use secrecy::{ExposeSecret, SecretString};

use super::CliError;

/// One line per admin: email and display name.
#[must_use]
pub fn list(store: &ContentStore) -> Vec<String> {
    store
        .admin_users()
        .iter()
        .map(|user| format!("{:<32} {}", user.email, user.display_name()))
        .collect()
}

/// Create a new admin user.
///
/// # Errors
///
/// Returns an error if the email is malformed or taken, the password is
/// empty, or the accounts cannot be persisted.
pub fn create_user(
    store: &mut ContentStore,
    email: &str,
    password: &SecretString,
    name: Option<&str>,
) -> Result<(), CliError> {
    let email = Email::parse(email).map_err(|_| CliError::InvalidEmail(email.to_owned()))?;
    if store.find_admin_user(email.as_str()).is_some() {
        return Err(CliError::UserExists(email.to_string()));
    }
    let password_hash = hash_password(password.expose_secret())?;

    tracing::info!("Creating admin user: {}", email);
    store.add_admin_user(AdminUser {
        email,
        password_hash,
        name: name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_owned),
    })?;
    tracing::info!("Admin user created successfully");
    Ok(())
}

/// Delete an admin user. The last remaining admin cannot be deleted.
///
/// # Errors
///
/// Returns `StoreError::LastAdmin` (wrapped) while only one admin exists,
/// or `CliError::UserNotFound` if no account has `email`.
pub fn delete_user(store: &mut ContentStore, email: &str) -> Result<(), CliError> {
    if !store.delete_admin_user(email)? {
        return Err(CliError::UserNotFound(email.to_owned()));
    }
    tracing::info!("Admin user deleted: {}", email);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use noievoi_site::store::{MemoryStorage, StoreError};
    use noievoi_site::store::seed::SEED_ADMIN_EMAIL;

    fn store() -> ContentStore {
        ContentStore::open(Box::new(MemoryStorage::new())).unwrap()
    }

    fn password() -> SecretString {
        SecretString::from("s3cret")
    }

    #[test]
    fn test_create_and_list() {
        let mut store = store();
        create_user(&mut store, "ops@noievoi.com", &password(), Some(" Ops ")).unwrap();

        let lines = list(&store);
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().any(|l| l.starts_with("ops@noievoi.com") && l.ends_with("Ops")));
        assert!(store.login("ops@noievoi.com", "s3cret").unwrap());
    }

    #[test]
    fn test_create_rejects_duplicate() {
        let mut store = store();
        let err = create_user(&mut store, SEED_ADMIN_EMAIL, &password(), None).unwrap_err();
        assert!(matches!(err, CliError::UserExists(_)));
        assert_eq!(store.admin_users().len(), 1);
    }

    #[test]
    fn test_create_rejects_bad_input() {
        let mut store = store();
        assert!(matches!(
            create_user(&mut store, "not-an-email", &password(), None),
            Err(CliError::InvalidEmail(_))
        ));
        assert!(matches!(
            create_user(&mut store, "ops@noievoi.com", &SecretString::from(""), None),
            Err(CliError::Auth(_))
        ));
    }

    #[test]
    fn test_delete_guards_last_admin() {
        let mut store = store();
        assert!(matches!(
            delete_user(&mut store, SEED_ADMIN_EMAIL),
            Err(CliError::Store(StoreError::LastAdmin))
        ));

        create_user(&mut store, "ops@noievoi.com", &password(), None).unwrap();
        assert!(matches!(
            delete_user(&mut store, "nobody@noievoi.com"),
            Err(CliError::UserNotFound(_))
        ));
        delete_user(&mut store, SEED_ADMIN_EMAIL).unwrap();
        assert_eq!(store.admin_users().len(), 1);
    }
}
