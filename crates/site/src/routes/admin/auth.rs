//! Admin authentication route handlers.
//!
//! Email and password are checked against the stored admin accounts. A
//! successful login records the admin in the browser session and sets the
//! persisted session flag; logout clears both.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{OptionalAdminAuth, clear_current_admin, set_current_admin};
use crate::models::CurrentAdmin;
use crate::services::auth::{AuthError, matches_any};
use crate::state::AppState;

use super::{MessageQuery, redirect_error, redirect_success};

/// Landing page after a successful login.
pub const HOME_PATH: &str = "/admin/content";

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: SecretString,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// `/admin`: send the visitor to the panel or the login page.
pub async fn index(OptionalAdminAuth(admin): OptionalAdminAuth) -> Redirect {
    if admin.is_some() {
        Redirect::to(HOME_PATH)
    } else {
        Redirect::to("/admin/login")
    }
}

/// Display the login page.
pub async fn login_page(
    OptionalAdminAuth(admin): OptionalAdminAuth,
    Query(query): Query<MessageQuery>,
) -> Response {
    if admin.is_some() {
        return Redirect::to(HOME_PATH).into_response();
    }
    LoginTemplate {
        error: query.error_message(),
        success: query.success_message(),
    }
    .into_response()
}

/// Handle login form submission.
///
/// # Errors
///
/// Returns an error if the session flag or the browser session cannot be
/// written.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    tokio::time::sleep(state.config().login_delay).await;

    let email = form.email.trim();
    let hashes = state.store().read().await.password_hashes(email);
    let password = form.password;
    let matched =
        tokio::task::spawn_blocking(move || matches_any(password.expose_secret(), &hashes))
            .await
            .map_err(|_| AuthError::PasswordHash)?;
    if !matched {
        tracing::warn!(email, "admin login failed");
        return Ok(redirect_error("/admin/login", "credentials").into_response());
    }

    let admin = {
        let mut store = state.store().write().await;
        store.mark_authenticated()?;
        store.find_admin_user(email).map(CurrentAdmin::from)
    };

    let Some(admin) = admin else {
        return Ok(redirect_error("/admin/login", "credentials").into_response());
    };

    set_current_admin(&session, &admin).await?;
    set_sentry_user(admin.email.as_str());
    tracing::info!(email = %admin.email, "admin logged in");

    Ok(Redirect::to(HOME_PATH).into_response())
}

/// Handle logout.
///
/// # Errors
///
/// Returns an error if the session flag or the browser session cannot be
/// written.
#[instrument(skip(state, session))]
pub async fn logout(State(state): State<AppState>, session: Session) -> Result<Redirect> {
    clear_current_admin(&session).await?;
    state.store().write().await.logout()?;
    clear_sentry_user();
    Ok(redirect_success("/admin/login", "logged_out"))
}
