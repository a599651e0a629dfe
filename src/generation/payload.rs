use serde::Serialize;
use serde_json::Value;

use crate::generation::prompts;

/// Retrieved data handed to the model alongside the query.
#[derive(Debug, Clone, PartialEq)]
pub enum ContextData {
    /// Already serialized text, embedded as is.
    Text(String),
    /// Structured value, serialized to JSON before embedding.
    Structured(Value),
}

impl ContextData {
    /// Renders the data as text for the system prompt.
    ///
    /// Non-ASCII characters are written literally, never as `\u` escapes.
    pub fn normalize(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Structured(value) => value.to_string(),
        }
    }
}

impl From<String> for ContextData {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for ContextData {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Value> for ContextData {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Self::Text(text),
            other => Self::Structured(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Request body for the chat-completions endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatPayload {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

/// Builds the system + user message pair for one query.
pub fn build_payload(model: &str, query: &str, context_data: &str) -> ChatPayload {
    ChatPayload {
        model: model.to_string(),
        messages: vec![
            ChatMessage::system(prompts::system_prompt(context_data)),
            ChatMessage::user(prompts::user_prompt(query)),
        ],
    }
}
