//! Product-aware text generation over a chat-completions endpoint.
//!
//! The module turns a user query plus retrieved product data into a
//! two-message chat request and returns the model's answer as plain text.

/// Error type for the fallible generation path.
pub mod error;
/// Session-owning client for the generation endpoint.
pub mod generator;
/// Chat payload types and context-data normalization.
pub mod payload;
/// Fixed prompt templates.
pub mod prompts;

pub use error::GenerationError;
pub use generator::{FALLBACK_MESSAGE, GeneratorSession, TextGenerator};
pub use payload::{ChatMessage, ChatPayload, ContextData, build_payload};
