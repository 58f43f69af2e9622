//! Chatbot configuration and the scripted responder.
//!
//! The chatbot answers from a fixed list of question/answer pairs. Matching
//! is a case-insensitive substring test against the question text; the
//! first match in list order wins.

use serde::{Deserialize, Serialize};

use crate::types::{CharacterId, Gender, QuestionId};

/// Answer given when no configured question matches.
pub const FALLBACK_ANSWER: &str =
    "I'm not sure how to answer that. Can you try rephrasing or ask something else?";

/// Minimum trimmed query length before live suggestions are offered.
const MIN_SUGGEST_CHARS: usize = 2;

/// A persona the chatbot can present as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatbotCharacter {
    pub id: CharacterId,
    pub name: String,
    pub gender: Gender,
    pub avatar_url: String,
}

/// A scripted question and its answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatbotQuestion {
    #[serde(default)]
    pub id: QuestionId,
    pub question: String,
    pub answer: String,
}

impl ChatbotQuestion {
    /// Create a question without an id.
    #[must_use]
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            id: QuestionId::default(),
            question: question.into(),
            answer: answer.into(),
        }
    }

    fn matches(&self, needle_lower: &str) -> bool {
        self.question.to_lowercase().contains(needle_lower)
    }
}

/// Chatbot settings; a single record per site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatbotConfig {
    pub enabled: bool,
    /// Should name one of `characters`; not enforced on write.
    pub selected_character: CharacterId,
    pub welcome_message: String,
    #[serde(default)]
    pub characters: Vec<ChatbotCharacter>,
    #[serde(default)]
    pub questions: Vec<ChatbotQuestion>,
}

impl ChatbotConfig {
    /// The selected character, or the first one when the selection names
    /// no existing character.
    #[must_use]
    pub fn active_character(&self) -> Option<&ChatbotCharacter> {
        self.characters
            .iter()
            .find(|c| c.id == self.selected_character)
            .or_else(|| self.characters.first())
    }

    /// Responder over this config's questions.
    #[must_use]
    pub fn responder(&self) -> ChatbotResponder<'_> {
        ChatbotResponder::new(&self.questions)
    }
}

/// Outcome of committing a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply<'a> {
    /// A configured question matched.
    Matched(&'a ChatbotQuestion),
    /// Nothing matched; answer with [`FALLBACK_ANSWER`].
    Fallback,
}

impl<'a> Reply<'a> {
    /// The text to show the visitor.
    #[must_use]
    pub fn answer(&self) -> &'a str {
        match *self {
            Self::Matched(q) => &q.answer,
            Self::Fallback => FALLBACK_ANSWER,
        }
    }

    /// The matched question, if any.
    #[must_use]
    pub const fn question(&self) -> Option<&'a ChatbotQuestion> {
        match *self {
            Self::Matched(q) => Some(q),
            Self::Fallback => None,
        }
    }
}

/// Case-insensitive substring matcher over a question list.
#[derive(Debug, Clone, Copy)]
pub struct ChatbotResponder<'a> {
    questions: &'a [ChatbotQuestion],
}

impl<'a> ChatbotResponder<'a> {
    #[must_use]
    pub const fn new(questions: &'a [ChatbotQuestion]) -> Self {
        Self { questions }
    }

    /// Questions containing the partially typed `query`, in list order.
    ///
    /// Returns nothing until the trimmed query has at least two characters.
    #[must_use]
    pub fn suggest(&self, query: &str) -> Vec<&'a ChatbotQuestion> {
        if query.trim().chars().count() < MIN_SUGGEST_CHARS {
            return Vec::new();
        }
        let needle = query.to_lowercase();
        self.questions.iter().filter(|q| q.matches(&needle)).collect()
    }

    /// The reply to a submitted message: the first question containing it,
    /// or the fallback. A blank message never matches.
    #[must_use]
    pub fn respond(&self, message: &str) -> Reply<'a> {
        if message.trim().is_empty() {
            return Reply::Fallback;
        }
        let needle = message.to_lowercase();
        self.questions
            .iter()
            .find(|q| q.matches(&needle))
            .map_or(Reply::Fallback, Reply::Matched)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn questions() -> Vec<ChatbotQuestion> {
        vec![
            ChatbotQuestion {
                id: "q-1".into(),
                ..ChatbotQuestion::new("What services do you offer?", "Consulting.")
            },
            ChatbotQuestion {
                id: "q-2".into(),
                ..ChatbotQuestion::new("How can I contact your team?", "Email us.")
            },
            ChatbotQuestion {
                id: "q-3".into(),
                ..ChatbotQuestion::new("Where are you located?", "Everywhere.")
            },
        ]
    }

    fn character(id: &str, name: &str) -> ChatbotCharacter {
        ChatbotCharacter {
            id: id.into(),
            name: name.into(),
            gender: Gender::Female,
            avatar_url: format!("/avatars/{id}.jpg"),
        }
    }

    #[test]
    fn test_respond_matches_substring_case_insensitively() {
        let qs = questions();
        let responder = ChatbotResponder::new(&qs);
        let reply = responder.respond("SERVICES");
        assert_eq!(reply.question().unwrap().id.as_str(), "q-1");
        assert_eq!(reply.answer(), "Consulting.");
    }

    #[test]
    fn test_respond_falls_back() {
        let qs = questions();
        let reply = ChatbotResponder::new(&qs).respond("xyzzy");
        assert_eq!(reply, Reply::Fallback);
        assert_eq!(reply.answer(), FALLBACK_ANSWER);
    }

    #[test]
    fn test_first_match_wins() {
        let qs = questions();
        // "you" appears in all three questions
        let reply = ChatbotResponder::new(&qs).respond("you");
        assert_eq!(reply.question().unwrap().id.as_str(), "q-1");
    }

    #[test]
    fn test_blank_message_never_matches() {
        let qs = questions();
        assert_eq!(ChatbotResponder::new(&qs).respond("   "), Reply::Fallback);
    }

    #[test]
    fn test_suggest_requires_two_characters() {
        let qs = questions();
        let responder = ChatbotResponder::new(&qs);
        assert!(responder.suggest("w").is_empty());
        assert!(responder.suggest(" w ").is_empty());
        let hits: Vec<_> = responder.suggest("wh").iter().map(|q| q.id.as_str()).collect();
        assert_eq!(hits, ["q-1", "q-3"]);
    }

    #[test]
    fn test_suggest_returns_all_matches_in_order() {
        let qs = questions();
        let hits = ChatbotResponder::new(&qs).suggest("YOU");
        assert_eq!(hits.len(), 3);
    }

    #[test]
    fn test_active_character_falls_back_to_first() {
        let mut config = ChatbotConfig {
            enabled: true,
            selected_character: "char-2".into(),
            welcome_message: "Hi".into(),
            characters: vec![character("char-1", "Alex"), character("char-2", "Mike")],
            questions: questions(),
        };
        assert_eq!(config.active_character().unwrap().name, "Mike");

        config.selected_character = "gone".into();
        assert_eq!(config.active_character().unwrap().name, "Alex");

        config.characters.clear();
        assert!(config.active_character().is_none());
    }

    #[test]
    fn test_config_uses_camel_case_keys() {
        let json = r#"{"enabled": false, "selectedCharacter": "char-1",
                       "welcomeMessage": "Hello!", "characters": [
                         {"id": "char-1", "name": "Alex", "gender": "male", "avatarUrl": "a.jpg"}
                       ], "questions": []}"#;
        let config: ChatbotConfig = serde_json::from_str(json).unwrap();
        assert!(!config.enabled);
        assert_eq!(config.characters[0].gender, Gender::Male);
        assert_eq!(config.responder().respond("hi"), Reply::Fallback);
    }
}
