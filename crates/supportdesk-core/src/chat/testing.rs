//! In-memory test doubles for the chat service.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use supportdesk_types::chat::{Conversation, NewMessage, SenderRole, StoredMessage};
use supportdesk_types::error::RepositoryError;
use supportdesk_types::llm::{
    CompletionRequest, CompletionResponse, LlmError, StopReason, Usage,
};
use uuid::Uuid;

use super::repository::ConversationRepository;
use crate::llm::provider::LlmProvider;

#[derive(Default)]
struct Store {
    conversations: Vec<Conversation>,
    messages: Vec<StoredMessage>,
    next_id: i64,
}

/// Vec-backed repository with switchable failures.
#[derive(Default)]
pub(crate) struct InMemoryRepository {
    store: Mutex<Store>,
    writes: AtomicUsize,
    fail_create: AtomicBool,
    fail_recent: AtomicBool,
    fail_get: AtomicBool,
    fail_sender: Mutex<Option<SenderRole>>,
}

impl InMemoryRepository {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn fail_create_conversation(&self, fail: bool) {
        self.fail_create.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn fail_recent_messages(&self, fail: bool) {
        self.fail_recent.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn fail_get_messages(&self, fail: bool) {
        self.fail_get.store(fail, Ordering::SeqCst);
    }

    /// Make `save_message` fail for one sender.
    pub(crate) fn fail_save_sender(&self, sender: Option<SenderRole>) {
        *self.fail_sender.lock().unwrap() = sender;
    }

    /// Number of attempted writes, failed or not.
    pub(crate) fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub(crate) fn conversation_count(&self) -> usize {
        self.store.lock().unwrap().conversations.len()
    }

    pub(crate) fn message_count(&self) -> usize {
        self.store.lock().unwrap().messages.len()
    }
}

impl ConversationRepository for InMemoryRepository {
    async fn create_conversation(
        &self,
        conversation: &Conversation,
    ) -> Result<Conversation, RepositoryError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(RepositoryError::Connection);
        }
        self.store
            .lock()
            .unwrap()
            .conversations
            .push(conversation.clone());
        Ok(conversation.clone())
    }

    async fn get_conversation(
        &self,
        conversation_id: &Uuid,
    ) -> Result<Option<Conversation>, RepositoryError> {
        let store = self.store.lock().unwrap();
        Ok(store
            .conversations
            .iter()
            .find(|c| c.id == *conversation_id)
            .cloned())
    }

    async fn save_message(&self, message: &NewMessage) -> Result<StoredMessage, RepositoryError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if *self.fail_sender.lock().unwrap() == Some(message.sender) {
            return Err(RepositoryError::Query("disk I/O error".to_string()));
        }
        let mut store = self.store.lock().unwrap();
        store.next_id += 1;
        let stored = StoredMessage {
            id: store.next_id,
            conversation_id: message.conversation_id,
            sender: message.sender,
            text: message.text.clone(),
            created_at: message.created_at,
        };
        store.messages.push(stored.clone());
        Ok(stored)
    }

    async fn recent_messages(
        &self,
        conversation_id: &Uuid,
        limit: u32,
        before_id: Option<i64>,
    ) -> Result<Vec<StoredMessage>, RepositoryError> {
        if self.fail_recent.load(Ordering::SeqCst) {
            return Err(RepositoryError::Query("database is locked".to_string()));
        }
        let store = self.store.lock().unwrap();
        let matching: Vec<StoredMessage> = store
            .messages
            .iter()
            .filter(|m| m.conversation_id == *conversation_id)
            .filter(|m| before_id.is_none_or(|before| m.id < before))
            .cloned()
            .collect();
        let skip = matching.len().saturating_sub(limit as usize);
        Ok(matching.into_iter().skip(skip).collect())
    }

    async fn get_messages(
        &self,
        conversation_id: &Uuid,
    ) -> Result<Vec<StoredMessage>, RepositoryError> {
        if self.fail_get.load(Ordering::SeqCst) {
            return Err(RepositoryError::Connection);
        }
        let store = self.store.lock().unwrap();
        Ok(store
            .messages
            .iter()
            .filter(|m| m.conversation_id == *conversation_id)
            .cloned()
            .collect())
    }

    async fn count_conversations(&self) -> Result<u64, RepositoryError> {
        Ok(self.conversation_count() as u64)
    }

    async fn count_messages(&self) -> Result<u64, RepositoryError> {
        Ok(self.message_count() as u64)
    }
}

/// Provider that answers every request the same way and records what it saw.
#[derive(Clone)]
pub(crate) struct ScriptedProvider {
    reply: Option<String>,
    delay: Duration,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl ScriptedProvider {
    pub(crate) fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            delay: Duration::ZERO,
            requests: Arc::default(),
        }
    }

    /// Every call fails as if the upstream were overloaded.
    pub(crate) fn failing() -> Self {
        Self {
            reply: None,
            delay: Duration::ZERO,
            requests: Arc::default(),
        }
    }

    pub(crate) fn with_delay_ms(mut self, ms: u64) -> Self {
        self.delay = Duration::from_millis(ms);
        self
    }

    pub(crate) fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub(crate) fn last_request(&self) -> Option<CompletionRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let content = self.reply
            .clone()
            .ok_or_else(|| LlmError::Overloaded("scripted failure".to_string()))?;
        Ok(CompletionResponse {
            id: "scripted-1".to_string(),
            content,
            model: request.model.clone(),
            stop_reason: StopReason::EndTurn,
            usage: Usage {
                input_tokens: 12,
                output_tokens: 4,
            },
        })
    }
}
