//! JSON API routes.

pub mod chatbot;
