//! noievoi site library.
//!
//! Marketing pages, the chatbot API and the content admin panel, served
//! from one axum router. Exposed as a library so the router can be driven
//! in-process by the integration tests and the store reused by the CLI.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;

use axum::{Router, routing::get};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router with all routes and per-request layers.
///
/// Sentry layers are added by the binary so tests run without them.
pub fn app(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.config());
    let static_dir = ServeDir::new(&state.config().static_dir);

    Router::new()
        .route("/health", get(health))
        .merge(routes::page_routes())
        .nest("/api/chatbot", routes::chatbot_api_routes())
        .nest("/admin", routes::admin::routes())
        .nest_service("/static", static_dir)
        .fallback(routes::not_found::not_found)
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running.
async fn health() -> &'static str {
    "ok"
}
