//! LlmProvider trait definition.
//!
//! This is the core abstraction that all completion backends implement.

use supportdesk_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for LLM provider backends (Groq, OpenAI, any OpenAI-compatible endpoint).
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
/// Implementations live in supportdesk-infra (e.g., `OpenAiCompatibleProvider`).
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "groq", "openai").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
