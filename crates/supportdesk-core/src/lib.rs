//! Business logic and repository trait definitions for Supportdesk.
//!
//! This crate defines the "ports" (repository and provider traits) that the
//! infrastructure layer implements, plus the conversation orchestrator built
//! on top of them. It depends only on `supportdesk-types` -- never on
//! `supportdesk-infra` or any database/IO crate.

pub mod chat;
pub mod llm;
