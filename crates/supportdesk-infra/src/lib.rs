//! Infrastructure layer for Supportdesk.
//!
//! Contains implementations of the traits defined in `supportdesk-core`:
//! SQLite conversation storage and the OpenAI-compatible completion provider,
//! plus configuration loading, data-directory resolution, and API key lookup.

pub mod config;
pub mod filesystem;
pub mod llm;
pub mod secret;
pub mod sqlite;
