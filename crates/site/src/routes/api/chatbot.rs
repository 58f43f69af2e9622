//! Chatbot API routes.
//!
//! JSON endpoints backing the chat widget. Every endpoint answers 404 while
//! the chatbot is disabled, which the widget treats as "stay hidden".

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use noievoi_core::{ChatbotConfig, ChatbotQuestion};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Widget configuration.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetResponse {
    pub welcome_message: String,
    pub character: Option<CharacterResponse>,
}

/// The persona shown in the widget header.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterResponse {
    pub name: String,
    pub avatar_url: String,
}

/// A suggested question. Picking one shows its answer directly.
#[derive(Debug, Serialize)]
pub struct SuggestionResponse {
    pub id: String,
    pub question: String,
    pub answer: String,
}

impl From<&ChatbotQuestion> for SuggestionResponse {
    fn from(q: &ChatbotQuestion) -> Self {
        Self {
            id: q.id.to_string(),
            question: q.question.clone(),
            answer: q.answer.clone(),
        }
    }
}

/// Query for live suggestions.
#[derive(Debug, Deserialize)]
pub struct SuggestQuery {
    #[serde(default)]
    pub q: String,
}

/// A submitted chat message.
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub message: String,
}

/// The chatbot's reply.
#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: String,
    /// Whether a configured question matched.
    pub matched: bool,
}

fn ensure_enabled(config: &ChatbotConfig) -> Result<()> {
    if config.enabled {
        Ok(())
    } else {
        Err(AppError::NotFound("chatbot is disabled".to_string()))
    }
}

/// Widget configuration.
///
/// GET /api/chatbot
///
/// # Errors
///
/// Returns 404 when the chatbot is disabled.
#[instrument(skip(state))]
pub async fn widget(State(state): State<AppState>) -> Result<Json<WidgetResponse>> {
    let store = state.store().read().await;
    let config = store.chatbot_config();
    ensure_enabled(config)?;

    Ok(Json(WidgetResponse {
        welcome_message: config.welcome_message.clone(),
        character: config.active_character().map(|c| CharacterResponse {
            name: c.name.clone(),
            avatar_url: c.avatar_url.clone(),
        }),
    }))
}

/// Questions matching a partially typed message.
///
/// GET /api/chatbot/suggest?q=...
///
/// # Errors
///
/// Returns 404 when the chatbot is disabled.
#[instrument(skip(state))]
pub async fn suggest(
    State(state): State<AppState>,
    Query(query): Query<SuggestQuery>,
) -> Result<Json<Vec<SuggestionResponse>>> {
    let store = state.store().read().await;
    let config = store.chatbot_config();
    ensure_enabled(config)?;

    let suggestions = config
        .responder()
        .suggest(&query.q)
        .into_iter()
        .map(SuggestionResponse::from)
        .collect();
    Ok(Json(suggestions))
}

/// Answer a submitted message.
///
/// POST /api/chatbot/ask
///
/// # Errors
///
/// Returns 404 when the chatbot is disabled.
#[instrument(skip(state, request))]
pub async fn ask(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>> {
    let store = state.store().read().await;
    let config = store.chatbot_config();
    ensure_enabled(config)?;

    let reply = config.responder().respond(&request.message);
    tracing::debug!(matched = reply.question().is_some(), "chatbot reply");
    Ok(Json(AskResponse {
        answer: reply.answer().to_string(),
        matched: reply.question().is_some(),
    }))
}
