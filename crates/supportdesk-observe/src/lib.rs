//! Observability for Supportdesk: subscriber setup and the attribute names
//! shared by every completion span.

pub mod genai_attrs;
pub mod tracing_setup;
