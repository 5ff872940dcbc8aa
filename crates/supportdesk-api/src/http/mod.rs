//! HTTP layer for Supportdesk.
//!
//! Axum router serving the chat widget and the two JSON endpoints under
//! `/api/chat/`, with permissive CORS so the widget can be embedded anywhere.

pub mod error;
pub mod handlers;
pub mod router;
