//! HTTP route handlers for the site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /services               - Services page
//! GET  /team                   - Team page
//! GET  /team/{id}              - Team member detail (unknown ids redirect to /team)
//! GET  /health                 - Health check
//!
//! # Chatbot API (404 while the chatbot is disabled)
//! GET  /api/chatbot            - Widget configuration
//! GET  /api/chatbot/suggest    - Questions matching ?q=
//! POST /api/chatbot/ask        - Answer a message
//!
//! # Admin (requires auth except login)
//! GET  /admin                  - Redirect to content or login
//! GET  /admin/login            - Login page
//! POST /admin/login            - Login action
//! POST /admin/logout           - Logout action
//! GET  /admin/content          - Content list (?type= tab)
//! POST /admin/content          - Create content (multipart)
//! GET  /admin/content/new      - New content form (?type=)
//! GET  /admin/content/{id}/edit   - Edit content form
//! POST /admin/content/{id}        - Update content (multipart)
//! POST /admin/content/{id}/delete - Delete content
//! GET  /admin/chatbot          - Chatbot settings (?edit= question)
//! POST /admin/chatbot/settings - Save enable flag, welcome message, character
//! POST /admin/chatbot/characters/{id}     - Rename character
//! POST /admin/chatbot/questions           - Add question
//! POST /admin/chatbot/questions/{id}      - Update question
//! POST /admin/chatbot/questions/{id}/delete - Delete question
//! GET  /admin/users            - Admin users (?edit= email)
//! POST /admin/users            - Add admin
//! POST /admin/users/update     - Update admin
//! POST /admin/users/delete     - Delete admin
//! ```

pub mod admin;
pub mod api;
pub mod home;
pub mod not_found;
pub mod sections;
pub mod services;
pub mod team;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the public page routes.
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/services", get(services::index))
        .route("/team", get(team::index))
        .route("/team/{id}", get(team::show))
}

/// Create the chatbot API routes router.
pub fn chatbot_api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(api::chatbot::widget))
        .route("/suggest", get(api::chatbot::suggest))
        .route("/ask", post(api::chatbot::ask))
}
