//! noievoi Core - Shared content types.
//!
//! This crate provides the domain types used across all noievoi components:
//! - `site` - Marketing site and embedded admin panel
//! - `cli` - Command-line tools for seeding and managing the content store
//!
//! # Architecture
//!
//! The core crate contains only types and pure queries - no I/O, no storage
//! access, no HTTP. The content store that persists these types lives in the
//! site crate.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, emails, and closed tag sets
//! - [`content`] - Page content records and the per-page derived views
//! - [`chatbot`] - Chatbot configuration and the scripted responder
//! - [`admin`] - Admin account records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod admin;
pub mod chatbot;
pub mod content;
pub mod types;

pub use admin::{AdminUser, AdminUserUpdate, PasswordHash};
pub use chatbot::{
    ChatbotCharacter, ChatbotConfig, ChatbotQuestion, ChatbotResponder, FALLBACK_ANSWER, Reply,
};
pub use content::{ContentBody, ContentItem, PageView, Project, Step, TeamMember};
pub use types::*;
