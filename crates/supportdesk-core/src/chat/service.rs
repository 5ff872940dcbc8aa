//! Chat service orchestrating one support-chat turn end to end.
//!
//! `ChatService::handle_message` validates the input, resolves or creates the
//! conversation, persists the user turn, replays a bounded history window to
//! the completion provider, persists the reply, and returns it.
//! `ChatService::get_history` reads a conversation back for the widget.
//!
//! Failure policy:
//! - validation errors return before any side effect
//! - session creation and the user-turn write fail fast
//! - a failed history read degrades to an empty context
//! - a failed completion follows [`CompletionFailurePolicy`]
//! - a failed assistant-turn write is logged and otherwise ignored

use supportdesk_types::chat::{
    ChatReply, Conversation, HistoryEntry, NewMessage, SendMessageRequest, SenderRole,
};
use supportdesk_types::config::{AppConfig, CompletionFailurePolicy};
use supportdesk_types::error::ChatError;
use supportdesk_types::llm::{CompletionRequest, LlmError};
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

use crate::chat::locks::SessionLocks;
use crate::chat::prompt;
use crate::chat::repository::ConversationRepository;
use crate::llm::box_provider::BoxLlmProvider;

/// Orchestrator knobs, resolved once from [`AppConfig`] at startup.
#[derive(Debug, Clone)]
pub struct ChatSettings {
    pub history_window: u32,
    pub system_prompt: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub failure_policy: CompletionFailurePolicy,
    pub fallback_reply: String,
    pub serialize_sessions: bool,
    /// Named in the error returned when no provider is configured.
    pub api_key_env: String,
}

impl From<&AppConfig> for ChatSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            history_window: config.history_window,
            system_prompt: config.system_prompt.clone(),
            model: config.provider.model.clone(),
            max_tokens: config.provider.max_tokens,
            temperature: config.provider.temperature,
            failure_policy: config.completion_failure,
            fallback_reply: config.fallback_reply.clone(),
            serialize_sessions: config.serialize_sessions,
            api_key_env: config.provider.resolved_api_key_env().to_string(),
        }
    }
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

/// Parse an optional caller-supplied session id.
///
/// Absent, empty, or whitespace-only ids mean "start a new conversation".
pub fn parse_session_id(raw: Option<&str>) -> Result<Option<Uuid>, ChatError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => s
            .parse::<Uuid>()
            .map(Some)
            .map_err(|_| ChatError::invalid_session()),
    }
}

/// Orchestrates support-chat turns and history reads.
///
/// Generic over `ConversationRepository` to maintain clean architecture
/// (supportdesk-core never depends on supportdesk-infra). The provider is
/// optional: a missing credential is reported per request, not at startup.
pub struct ChatService<R: ConversationRepository> {
    repo: R,
    provider: Option<BoxLlmProvider>,
    settings: ChatSettings,
    locks: SessionLocks,
}

impl<R: ConversationRepository> ChatService<R> {
    /// Create a new chat service with the given repository and provider.
    pub fn new(repo: R, provider: Option<BoxLlmProvider>, settings: ChatSettings) -> Self {
        Self {
            repo,
            provider,
            settings,
            locks: SessionLocks::new(),
        }
    }

    /// Access the conversation repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    pub fn provider(&self) -> Option<&BoxLlmProvider> {
        self.provider.as_ref()
    }

    /// Name of the configured provider, if any.
    pub fn provider_name(&self) -> Option<&str> {
        self.provider.as_ref().map(|p| p.name())
    }

    // --- Message operation ---

    /// Handle one user message and return the assistant's reply.
    ///
    /// Side effects per call: one to three store writes, one or two reads,
    /// and one completion call. Not idempotent: a retry stores the user turn
    /// again and, without a session id, opens another conversation.
    pub async fn handle_message(
        &self,
        request: SendMessageRequest,
    ) -> Result<ChatReply, ChatError> {
        let message = request.message.unwrap_or_default();
        if message.trim().is_empty() {
            return Err(ChatError::empty_message());
        }
        let requested = parse_session_id(request.session_id.as_deref())?;

        let provider = self.provider.as_ref().ok_or_else(|| {
            ChatError::NotConfigured(format!(
                "AI service is not configured: set {}",
                self.settings.api_key_env
            ))
        })?;

        let session_id = self.resolve_session(requested).await?;

        let _turn = if self.settings.serialize_sessions {
            Some(self.locks.acquire(session_id).await)
        } else {
            None
        };

        let user_turn = self
            .repo
            .save_message(&NewMessage::new(session_id, SenderRole::User, message.as_str()))
            .await?;

        let history = match self
            .repo
            .recent_messages(&session_id, self.settings.history_window, Some(user_turn.id))
            .await
        {
            Ok(history) => history,
            Err(e) => {
                warn!(session_id = %session_id, error = %e, "History read failed, continuing without context");
                Vec::new()
            }
        };
        debug!(session_id = %session_id, history = history.len(), "Loaded context window");

        let completion_request = prompt::build_completion_request(&self.settings, history, &message);

        let reply = match self.generate_reply(provider, &completion_request, session_id).await {
            Ok(reply) => reply,
            Err(e) => {
                return match self.settings.failure_policy {
                    CompletionFailurePolicy::Error => {
                        warn!(session_id = %session_id, error = %e, "Completion failed");
                        Err(ChatError::UpstreamUnavailable(e))
                    }
                    CompletionFailurePolicy::Fallback => {
                        warn!(session_id = %session_id, error = %e, "Completion failed, sending fallback reply");
                        Ok(ChatReply {
                            reply: self.settings.fallback_reply.clone(),
                            session_id: session_id.to_string(),
                        })
                    }
                };
            }
        };

        if let Err(e) = self
            .repo
            .save_message(&NewMessage::new(session_id, SenderRole::Assistant, reply.as_str()))
            .await
        {
            warn!(session_id = %session_id, error = %e, "Failed to persist assistant reply");
        }

        Ok(ChatReply {
            reply,
            session_id: session_id.to_string(),
        })
    }

    // --- History operation ---

    /// Read a conversation back, oldest turn first.
    ///
    /// Absent, malformed, or unknown ids yield an empty list rather than an
    /// error; only a store failure is reported.
    pub async fn get_history(
        &self,
        session_id: Option<&str>,
    ) -> Result<Vec<HistoryEntry>, ChatError> {
        let Ok(Some(session_id)) = parse_session_id(session_id) else {
            return Ok(Vec::new());
        };

        let messages = self.repo.get_messages(&session_id).await?;
        Ok(messages.into_iter().map(HistoryEntry::from).collect())
    }

    // --- Internals ---

    /// Adopt an existing conversation or open a new one.
    ///
    /// An id the store does not know (e.g. after a database reset) is
    /// replaced by a fresh conversation so a stale client recovers.
    async fn resolve_session(&self, requested: Option<Uuid>) -> Result<Uuid, ChatError> {
        if let Some(id) = requested {
            if self.repo.get_conversation(&id).await?.is_some() {
                return Ok(id);
            }
            info!(requested = %id, "Unknown session id, starting a new conversation");
        }

        let conversation = self.repo.create_conversation(&Conversation::new()).await?;
        info!(session_id = %conversation.id, "Conversation created");
        Ok(conversation.id)
    }

    async fn generate_reply(
        &self,
        provider: &BoxLlmProvider,
        request: &CompletionRequest,
        session_id: Uuid,
    ) -> Result<String, LlmError> {
        let span = info_span!(
            "gen_ai.chat",
            session_id = %session_id,
            gen_ai.operation.name = "chat",
            gen_ai.provider.name = provider.name(),
            gen_ai.request.model = %request.model,
            gen_ai.request.max_tokens = request.max_tokens,
            gen_ai.request.temperature = ?request.temperature,
            gen_ai.response.id = tracing::field::Empty,
            gen_ai.response.model = tracing::field::Empty,
            gen_ai.response.finish_reasons = tracing::field::Empty,
            gen_ai.usage.input_tokens = tracing::field::Empty,
            gen_ai.usage.output_tokens = tracing::field::Empty,
        );

        let response = provider.complete(request).instrument(span).await?;
        if response.content.trim().is_empty() {
            return Err(LlmError::EmptyCompletion);
        }

        info!(
            session_id = %session_id,
            model = %response.model,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "Reply generated"
        );
        Ok(response.content)
    }
}
