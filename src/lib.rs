//! Product question answering backed by a chat-completions API.

pub mod commands;
pub mod config;
pub mod generation;
pub mod logging;
