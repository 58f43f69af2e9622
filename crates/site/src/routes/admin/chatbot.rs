//! Chatbot settings route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tracing::instrument;

use noievoi_core::{CharacterId, ChatbotQuestion, QuestionId};

use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

use super::{AdminUserView, MessageQuery, edit_url, redirect_error, redirect_success};

const PAGE_PATH: &str = "/admin/chatbot";

// =============================================================================
// Form Types
// =============================================================================

/// General settings form. An unchecked checkbox is simply absent.
#[derive(Debug, Deserialize)]
pub struct SettingsForm {
    pub enabled: Option<String>,
    pub welcome_message: String,
    pub selected_character: Option<String>,
}

/// Character rename form.
#[derive(Debug, Deserialize)]
pub struct CharacterForm {
    pub name: String,
}

/// Question add/edit form.
#[derive(Debug, Deserialize)]
pub struct QuestionForm {
    pub question: String,
    pub answer: String,
}

impl QuestionForm {
    /// Trimmed question and answer, or `None` if either is blank.
    fn into_question(self) -> Option<ChatbotQuestion> {
        let question = self.question.trim();
        let answer = self.answer.trim();
        if question.is_empty() || answer.is_empty() {
            return None;
        }
        Some(ChatbotQuestion::new(question, answer))
    }
}

/// Selects the question being edited.
#[derive(Debug, Deserialize)]
pub struct EditQuery {
    pub edit: Option<String>,
}

// =============================================================================
// Views
// =============================================================================

/// A selectable persona.
#[derive(Debug, Clone)]
pub struct CharacterView {
    pub id: String,
    pub name: String,
    pub gender: String,
    pub avatar_url: String,
    pub selected: bool,
}

/// A configured question.
#[derive(Debug, Clone)]
pub struct QuestionView {
    pub id: String,
    pub question: String,
    pub answer: String,
}

impl From<&ChatbotQuestion> for QuestionView {
    fn from(q: &ChatbotQuestion) -> Self {
        Self {
            id: q.id.to_string(),
            question: q.question.clone(),
            answer: q.answer.clone(),
        }
    }
}

/// Chatbot settings page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/chatbot.html")]
pub struct ChatbotTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub enabled: bool,
    pub welcome_message: String,
    pub characters: Vec<CharacterView>,
    pub questions: Vec<QuestionView>,
    /// Question loaded into the form for editing.
    pub editing: Option<QuestionView>,
    pub success: Option<String>,
    pub error: Option<String>,
}

// =============================================================================
// Route Handlers
// =============================================================================

/// Chatbot settings page.
#[instrument(skip(admin, state))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(edit): Query<EditQuery>,
    Query(messages): Query<MessageQuery>,
) -> impl IntoResponse {
    let store = state.store().read().await;
    let config = store.chatbot_config();
    let active = config.active_character().map(|c| c.id.clone());

    let characters = config
        .characters
        .iter()
        .map(|c| CharacterView {
            id: c.id.to_string(),
            name: c.name.clone(),
            gender: c.gender.to_string(),
            avatar_url: c.avatar_url.clone(),
            selected: active.as_ref() == Some(&c.id),
        })
        .collect();
    let editing = edit.edit.as_deref().and_then(|id| {
        config
            .questions
            .iter()
            .find(|q| q.id.as_str() == id)
            .map(QuestionView::from)
    });

    ChatbotTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: PAGE_PATH.to_string(),
        enabled: config.enabled,
        welcome_message: config.welcome_message.clone(),
        characters,
        questions: config.questions.iter().map(QuestionView::from).collect(),
        editing,
        success: messages.success_message(),
        error: messages.error_message(),
    }
}

/// Save the enable flag, welcome message and selected character.
///
/// # Errors
///
/// Returns an error if the configuration cannot be persisted.
#[instrument(skip(_admin, state))]
pub async fn update_settings(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Form(form): Form<SettingsForm>,
) -> Result<Redirect> {
    let mut store = state.store().write().await;
    let mut config = store.chatbot_config().clone();
    config.enabled = form.enabled.is_some();
    config.welcome_message = form.welcome_message.trim().to_string();
    if let Some(id) = form.selected_character.filter(|id| !id.is_empty()) {
        config.selected_character = CharacterId::new(id);
    }
    store.update_chatbot_config(config)?;
    Ok(redirect_success(PAGE_PATH, "settings"))
}

/// Rename a character.
///
/// # Errors
///
/// Returns an error if the configuration cannot be persisted.
#[instrument(skip(_admin, state))]
pub async fn rename_character(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<CharacterForm>,
) -> Result<Redirect> {
    let name = form.name.trim();
    if name.is_empty() {
        return Ok(redirect_error(PAGE_PATH, "required"));
    }

    let mut store = state.store().write().await;
    let mut config = store.chatbot_config().clone();
    let Some(character) = config.characters.iter_mut().find(|c| c.id.as_str() == id) else {
        return Ok(redirect_error(PAGE_PATH, "not_found"));
    };
    character.name = name.to_string();
    store.update_chatbot_config(config)?;
    Ok(redirect_success(PAGE_PATH, "character"))
}

/// Add a question.
///
/// # Errors
///
/// Returns an error if the configuration cannot be persisted.
#[instrument(skip(_admin, state))]
pub async fn create_question(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Form(form): Form<QuestionForm>,
) -> Result<Redirect> {
    let Some(question) = form.into_question() else {
        return Ok(redirect_error(PAGE_PATH, "required"));
    };
    state.store().write().await.add_chatbot_question(question)?;
    Ok(redirect_success(PAGE_PATH, "question_added"))
}

/// Replace a question's text and answer.
///
/// # Errors
///
/// Returns an error if the configuration cannot be persisted.
#[instrument(skip(_admin, state))]
pub async fn update_question(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<QuestionForm>,
) -> Result<Redirect> {
    let Some(question) = form.into_question() else {
        return Ok(redirect_error(&edit_url(PAGE_PATH, &id), "required"));
    };
    let question = ChatbotQuestion {
        id: QuestionId::new(id),
        ..question
    };
    if !state.store().write().await.update_chatbot_question(question)? {
        return Ok(redirect_error(PAGE_PATH, "not_found"));
    }
    Ok(redirect_success(PAGE_PATH, "question_updated"))
}

/// Delete a question.
///
/// # Errors
///
/// Returns an error if the configuration cannot be persisted.
#[instrument(skip(_admin, state))]
pub async fn delete_question(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect> {
    state
        .store()
        .write()
        .await
        .delete_chatbot_question(&QuestionId::new(id))?;
    Ok(redirect_success(PAGE_PATH, "question_deleted"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_question_form_trims() {
        let form = QuestionForm {
            question: "  Where are you?  ".into(),
            answer: " Everywhere. ".into(),
        };
        let question = form.into_question().unwrap();
        assert_eq!(question.question, "Where are you?");
        assert_eq!(question.answer, "Everywhere.");
        assert!(question.id.is_empty());
    }

    #[test]
    fn test_question_form_requires_both_fields() {
        let form = QuestionForm {
            question: "Where?".into(),
            answer: "   ".into(),
        };
        assert!(form.into_question().is_none());
    }
}
