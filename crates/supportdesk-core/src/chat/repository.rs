//! ConversationRepository trait definition.
//!
//! Provides the insert/select operations over the `conversations` and
//! `messages` relations. Messages are always returned oldest-to-newest by
//! their store-assigned ordinal.

use supportdesk_types::chat::{Conversation, NewMessage, StoredMessage};
use supportdesk_types::error::RepositoryError;
use uuid::Uuid;

/// Repository trait for conversation and message persistence.
///
/// Implementations live in supportdesk-infra (e.g., `SqliteConversationRepository`).
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait ConversationRepository: Send + Sync {
    /// Insert a new conversation.
    fn create_conversation(
        &self,
        conversation: &Conversation,
    ) -> impl std::future::Future<Output = Result<Conversation, RepositoryError>> + Send;

    /// Get a conversation by its unique ID.
    fn get_conversation(
        &self,
        conversation_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<Conversation>, RepositoryError>> + Send;

    /// Append a message and return it with its assigned ordinal.
    fn save_message(
        &self,
        message: &NewMessage,
    ) -> impl std::future::Future<Output = Result<StoredMessage, RepositoryError>> + Send;

    /// The `limit` most recent messages of a conversation, oldest first.
    ///
    /// When `before_id` is set, only messages with a smaller ordinal are
    /// considered, so a turn that was just written can be excluded.
    fn recent_messages(
        &self,
        conversation_id: &Uuid,
        limit: u32,
        before_id: Option<i64>,
    ) -> impl std::future::Future<Output = Result<Vec<StoredMessage>, RepositoryError>> + Send;

    /// All messages of a conversation, oldest first.
    fn get_messages(
        &self,
        conversation_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Vec<StoredMessage>, RepositoryError>> + Send;

    /// Count all conversations.
    fn count_conversations(
        &self,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;

    /// Count all messages across conversations.
    fn count_messages(
        &self,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;
}
