//! OpenTelemetry GenAI Semantic Convention attribute constants.
//!
//! The orchestrator opens a `gen_ai.chat` span declaring the request-side
//! attributes and leaving the ones below empty; providers fill them in via
//! `tracing::Span::current().record(..)` once the response arrives.

// --- Response attributes ---

/// The model that actually answered, as reported by the provider.
pub const GEN_AI_RESPONSE_MODEL: &str = "gen_ai.response.model";

/// The unique response ID from the provider.
pub const GEN_AI_RESPONSE_ID: &str = "gen_ai.response.id";

/// The finish reasons for the response (e.g., "end_turn", "max_tokens").
pub const GEN_AI_RESPONSE_FINISH_REASONS: &str = "gen_ai.response.finish_reasons";

pub const GEN_AI_USAGE_INPUT_TOKENS: &str = "gen_ai.usage.input_tokens";

pub const GEN_AI_USAGE_OUTPUT_TOKENS: &str = "gen_ai.usage.output_tokens";

// --- Provider name values ---

pub const PROVIDER_GROQ: &str = "groq";

pub const PROVIDER_OPENAI: &str = "openai";

/// Any other OpenAI-compatible endpoint.
pub const PROVIDER_CUSTOM: &str = "custom";
