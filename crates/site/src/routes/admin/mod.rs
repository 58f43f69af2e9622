//! Admin panel route handlers.
//!
//! Every page except the login page requires an authenticated admin
//! session. Form posts redirect back to the page they came from with an
//! `?error=` or `?success=` code that the page turns into a notice.

pub mod auth;
pub mod chatbot;
pub mod content;
pub mod users;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    response::Redirect,
    routing::{get, post},
};
use serde::Deserialize;

use crate::models::CurrentAdmin;
use crate::services::upload::MAX_IMAGE_BYTES;
use crate::state::AppState;

/// Room for the non-file form fields on top of the largest allowed image.
const MULTIPART_OVERHEAD: usize = 1_000_000;

/// Create the admin router, mounted under `/admin`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(auth::index))
        // Auth
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
        // Content
        .route("/content", get(content::index).post(content::create))
        .route("/content/new", get(content::new_page))
        .route("/content/{id}", post(content::update))
        .route("/content/{id}/edit", get(content::edit_page))
        .route("/content/{id}/delete", post(content::delete))
        // Chatbot
        .route("/chatbot", get(chatbot::index))
        .route("/chatbot/settings", post(chatbot::update_settings))
        .route("/chatbot/characters/{id}", post(chatbot::rename_character))
        .route("/chatbot/questions", post(chatbot::create_question))
        .route("/chatbot/questions/{id}", post(chatbot::update_question))
        .route(
            "/chatbot/questions/{id}/delete",
            post(chatbot::delete_question),
        )
        // Admin users
        .route("/users", get(users::index).post(users::create))
        .route("/users/update", post(users::update))
        .route("/users/delete", post(users::delete))
        .layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES + MULTIPART_OVERHEAD))
}

/// Logged-in admin shown in the panel header.
#[derive(Debug, Clone)]
pub struct AdminUserView {
    pub name: String,
    pub email: String,
}

impl From<&CurrentAdmin> for AdminUserView {
    fn from(admin: &CurrentAdmin) -> Self {
        Self {
            name: admin.name.clone(),
            email: admin.email.to_string(),
        }
    }
}

/// Notice codes carried across a redirect.
#[derive(Debug, Default, Deserialize)]
pub struct MessageQuery {
    pub success: Option<String>,
    pub error: Option<String>,
}

impl MessageQuery {
    /// Human-readable success notice.
    #[must_use]
    pub fn success_message(&self) -> Option<String> {
        self.success.as_deref().map(|s| match s {
            "logged_out" => "You have been logged out".to_string(),
            "created" => "Created successfully".to_string(),
            "updated" => "Updated successfully".to_string(),
            "deleted" => "Deleted successfully".to_string(),
            "settings" => "Chatbot settings saved".to_string(),
            "character" => "Character updated".to_string(),
            "question_added" => "Question added successfully".to_string(),
            "question_updated" => "Question updated successfully".to_string(),
            "question_deleted" => "Question deleted successfully".to_string(),
            "user_added" => "Admin user added successfully".to_string(),
            "user_updated" => "Admin user updated successfully".to_string(),
            "user_deleted" => "Admin user deleted successfully".to_string(),
            _ => format!("Success: {s}"),
        })
    }

    /// Human-readable error notice.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        self.error.as_deref().map(|e| match e {
            "credentials" => "Login failed: Invalid email or password".to_string(),
            "required" => "Please fill in all required fields".to_string(),
            "not_image" => "Please select an image file".to_string(),
            "too_large" => "Image size must be less than 5MB".to_string(),
            "upload" => "The upload could not be read".to_string(),
            "email" => "Please enter a valid email address".to_string(),
            "password" => "Password is required".to_string(),
            "exists" => "An admin with this email already exists".to_string(),
            "last_admin" => "Cannot delete the only admin user".to_string(),
            "not_found" => "That item no longer exists".to_string(),
            _ => format!("Error: {e}"),
        })
    }
}

/// `path` with a notice code appended as a query parameter.
#[must_use]
pub fn notice_url(path: &str, kind: &str, code: &str) -> String {
    let sep = if path.contains('?') { '&' } else { '?' };
    format!("{path}{sep}{kind}={code}")
}

/// `path` with the row being edited named by `?edit=`.
#[must_use]
pub fn edit_url(path: &str, row: &str) -> String {
    format!("{path}?edit={}", urlencoding::encode(row))
}

/// Redirect to `path` with an `error` notice.
#[must_use]
pub fn redirect_error(path: &str, code: &str) -> Redirect {
    Redirect::to(&notice_url(path, "error", code))
}

/// Redirect to `path` with a `success` notice.
#[must_use]
pub fn redirect_success(path: &str, code: &str) -> Redirect {
    Redirect::to(&notice_url(path, "success", code))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_url() {
        assert_eq!(
            notice_url("/admin/users", "error", "exists"),
            "/admin/users?error=exists"
        );
        assert_eq!(
            notice_url("/admin/content?type=team", "success", "created"),
            "/admin/content?type=team&success=created"
        );
    }

    #[test]
    fn test_edit_url_encodes_row() {
        assert_eq!(
            edit_url("/admin/users", "ops+team@noievoi.com"),
            "/admin/users?edit=ops%2Bteam%40noievoi.com"
        );
        let url = notice_url(&edit_url("/admin/chatbot", "q\n1"), "error", "required");
        assert_eq!(url, "/admin/chatbot?edit=q%0A1&error=required");
        let _ = Redirect::to(&url);
    }

    #[test]
    fn test_known_codes_have_messages() {
        let query = MessageQuery {
            success: Some("user_deleted".into()),
            error: Some("last_admin".into()),
        };
        assert_eq!(
            query.success_message().unwrap(),
            "Admin user deleted successfully"
        );
        assert_eq!(
            query.error_message().unwrap(),
            "Cannot delete the only admin user"
        );
    }

    #[test]
    fn test_unknown_codes_are_shown_verbatim() {
        let query = MessageQuery {
            success: None,
            error: Some("weird".into()),
        };
        assert_eq!(query.error_message().unwrap(), "Error: weird");
        assert!(query.success_message().is_none());
    }
}
