//! Shared domain types for Supportdesk.
//!
//! This crate contains the core domain types used across the workspace:
//! conversations, stored messages, LLM request/response shapes, the
//! application config, and the error taxonomy.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
