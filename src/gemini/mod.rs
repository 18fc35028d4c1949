//! Gemini module
//!
//! Thin accessor for the remote model service: REST client, wire types and
//! the multi-turn chat session.

pub mod chat;
pub mod client;
pub mod error;
pub mod types;

pub use chat::{ChatMessage, ChatSession};
pub use client::{GeminiClient, GenerativeModel};
pub use error::GeminiError;
pub use types::Role;
