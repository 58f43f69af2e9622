//! Chatbot commands.

use noievoi_site::store::ContentStore;

/// The reply the widget would give to `query`.
#[must_use]
pub fn ask(store: &ContentStore, query: &str) -> String {
    let config = store.chatbot_config();
    if !config.enabled {
        tracing::warn!("Chatbot is disabled; the site would not show it");
    }
    let reply = config.responder().respond(query);
    match reply.question() {
        Some(question) => tracing::info!(id = %question.id, "Matched question"),
        None => tracing::info!("No question matched"),
    }
    reply.answer().to_string()
}
