//! Conversation persistence abstractions and the chat orchestrator.
//!
//! - `repository`: the `ConversationRepository` port implemented by infra
//! - `prompt`: assembles the completion request from history
//! - `locks`: per-session serialization of turns
//! - `service`: `ChatService`, the message and history operations

pub mod locks;
pub mod prompt;
pub mod repository;
pub mod service;

#[cfg(test)]
pub(crate) mod testing;
