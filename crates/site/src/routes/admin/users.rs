//! Admin users management route handlers.
//!
//! Accounts are keyed by email, so the edit and delete forms carry the
//! original email as a hidden field rather than in the path.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect},
};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use noievoi_core::{AdminUser, AdminUserUpdate, Email};

use crate::error::{Result, clear_sentry_user};
use crate::filters;
use crate::middleware::{RequireAdminAuth, clear_current_admin, set_current_admin};
use crate::models::CurrentAdmin;
use crate::services::auth::{AuthError, hash_password};
use crate::state::AppState;
use crate::store::StoreError;

use super::{AdminUserView, MessageQuery, edit_url, redirect_error, redirect_success};

const PAGE_PATH: &str = "/admin/users";

// =============================================================================
// Form Types
// =============================================================================

/// New admin form.
#[derive(Debug, Deserialize)]
pub struct CreateUserForm {
    pub email: String,
    pub password: SecretString,
    #[serde(default)]
    pub name: String,
}

/// Edit admin form. A blank password keeps the current one.
#[derive(Debug, Deserialize)]
pub struct UpdateUserForm {
    pub original_email: String,
    pub email: String,
    #[serde(default)]
    pub name: String,
    pub password: Option<SecretString>,
}

/// Delete admin form.
#[derive(Debug, Deserialize)]
pub struct DeleteUserForm {
    pub email: String,
}

/// Selects the account being edited.
#[derive(Debug, Deserialize)]
pub struct EditQuery {
    pub edit: Option<String>,
}

fn optional_name(name: &str) -> Option<String> {
    let name = name.trim();
    (!name.is_empty()).then(|| name.to_string())
}

// =============================================================================
// Views
// =============================================================================

/// Admin account row for templates.
#[derive(Debug, Clone)]
pub struct AdminUserListItem {
    pub email: String,
    pub name: String,
    pub is_current: bool,
}

/// Admin users page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/users.html")]
pub struct AdminUsersTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub users: Vec<AdminUserListItem>,
    /// Account loaded into the form for editing.
    pub editing: Option<AdminUserListItem>,
    pub can_delete: bool,
    pub success: Option<String>,
    pub error: Option<String>,
}

// =============================================================================
// Route Handlers
// =============================================================================

/// Admin users list page.
#[instrument(skip(admin, state))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(edit): Query<EditQuery>,
    Query(messages): Query<MessageQuery>,
) -> impl IntoResponse {
    let store = state.store().read().await;
    let users: Vec<AdminUserListItem> = store
        .admin_users()
        .iter()
        .map(|u| AdminUserListItem {
            email: u.email.to_string(),
            name: u.name.clone().unwrap_or_default(),
            is_current: u.email == admin.email,
        })
        .collect();
    let editing = edit
        .edit
        .as_deref()
        .and_then(|email| users.iter().find(|u| u.email == email).cloned());

    AdminUsersTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: PAGE_PATH.to_string(),
        can_delete: users.len() > 1,
        users,
        editing,
        success: messages.success_message(),
        error: messages.error_message(),
    }
}

/// Add an admin account.
///
/// # Errors
///
/// Returns an error if the password cannot be hashed or the accounts cannot
/// be persisted.
#[instrument(skip(_admin, state, form))]
pub async fn create(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Form(form): Form<CreateUserForm>,
) -> Result<Redirect> {
    let Ok(email) = Email::parse(&form.email) else {
        return Ok(redirect_error(PAGE_PATH, "email"));
    };
    let password_hash = match hash_password(form.password.expose_secret()) {
        Ok(hash) => hash,
        Err(AuthError::EmptyPassword) => return Ok(redirect_error(PAGE_PATH, "password")),
        Err(e) => return Err(e.into()),
    };

    let mut store = state.store().write().await;
    if store.find_admin_user(email.as_str()).is_some() {
        return Ok(redirect_error(PAGE_PATH, "exists"));
    }
    store.add_admin_user(AdminUser {
        email,
        password_hash,
        name: optional_name(&form.name),
    })?;
    Ok(redirect_success(PAGE_PATH, "user_added"))
}

/// Update an admin account.
///
/// Editing the logged-in account refreshes the session's copy.
///
/// # Errors
///
/// Returns an error if the password cannot be hashed or the accounts cannot
/// be persisted.
#[instrument(skip(admin, state, session, form))]
pub async fn update(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<UpdateUserForm>,
) -> Result<Redirect> {
    let edit_path = edit_url(PAGE_PATH, &form.original_email);
    let Ok(email) = Email::parse(&form.email) else {
        return Ok(redirect_error(&edit_path, "email"));
    };
    let password_hash = match form.password.as_ref().map(|p| p.expose_secret()) {
        Some(password) if !password.is_empty() => Some(hash_password(password)?),
        _ => None,
    };

    let refreshed = {
        let mut store = state.store().write().await;
        if email.as_str() != form.original_email && store.find_admin_user(email.as_str()).is_some()
        {
            return Ok(redirect_error(&edit_path, "exists"));
        }
        let update = AdminUserUpdate {
            email: Some(email.clone()),
            password_hash,
            name: Some(optional_name(&form.name)),
        };
        if !store.update_admin_user(&form.original_email, &update)? {
            return Ok(redirect_error(PAGE_PATH, "not_found"));
        }
        store
            .find_admin_user(email.as_str())
            .filter(|_| admin.email.as_str() == form.original_email)
            .map(CurrentAdmin::from)
    };

    if let Some(current) = refreshed {
        set_current_admin(&session, &current).await?;
    }
    Ok(redirect_success(PAGE_PATH, "user_updated"))
}

/// Delete an admin account. The only remaining account cannot be deleted.
///
/// Deleting the logged-in account ends the session.
///
/// # Errors
///
/// Returns an error if the accounts cannot be persisted.
#[instrument(skip(admin, state, session))]
pub async fn delete(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<DeleteUserForm>,
) -> Result<Redirect> {
    let mut store = state.store().write().await;
    match store.delete_admin_user(&form.email) {
        Ok(_) => {}
        Err(StoreError::LastAdmin) => return Ok(redirect_error(PAGE_PATH, "last_admin")),
        Err(e) => return Err(e.into()),
    }

    if admin.email.as_str() == form.email {
        store.logout()?;
        drop(store);
        clear_current_admin(&session).await?;
        clear_sentry_user();
        return Ok(Redirect::to("/admin/login"));
    }
    Ok(redirect_success(PAGE_PATH, "user_deleted"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_name() {
        assert_eq!(optional_name("  "), None);
        assert_eq!(optional_name(" Ops "), Some("Ops".to_string()));
    }
}
