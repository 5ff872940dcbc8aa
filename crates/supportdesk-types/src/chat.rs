//! Conversation, message, and wire types for the support chat.
//!
//! A `Conversation` is the persisted thread identifier; `StoredMessage` is one
//! role-tagged turn inside it. `SendMessageRequest`, `ChatReply` and
//! `HistoryEntry` are the JSON shapes exchanged with the browser widget.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

use crate::llm::MessageRole;

/// Who authored a stored turn.
///
/// The canonical assistant label is `assistant`. Older rows may carry `ai`;
/// both `FromStr` and serde accept it and normalize to [`SenderRole::Assistant`],
/// so nothing downstream ever sees the legacy value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SenderRole {
    User,
    #[serde(alias = "ai")]
    Assistant,
}

impl fmt::Display for SenderRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SenderRole::User => write!(f, "user"),
            SenderRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for SenderRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "user" => Ok(SenderRole::User),
            "assistant" | "ai" => Ok(SenderRole::Assistant),
            other => Err(format!("invalid sender role: '{other}'")),
        }
    }
}

impl From<SenderRole> for MessageRole {
    fn from(sender: SenderRole) -> Self {
        match sender {
            SenderRole::User => MessageRole::User,
            SenderRole::Assistant => MessageRole::Assistant,
        }
    }
}

/// A persisted conversation thread.
///
/// Created on the first message of a session and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Conversation {
    /// A fresh conversation with a time-sortable id.
    pub fn new() -> Self {
        Self {
            id: Uuid::now_v7(),
            created_at: Utc::now(),
        }
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

/// A single turn as read back from the store.
///
/// `id` is the store-assigned ordinal and the only ordering key;
/// `created_at` is informational.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredMessage {
    pub id: i64,
    pub conversation_id: Uuid,
    pub sender: SenderRole,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// A turn about to be written. The store assigns the ordinal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub conversation_id: Uuid,
    pub sender: SenderRole,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl NewMessage {
    pub fn new(conversation_id: Uuid, sender: SenderRole, text: impl Into<String>) -> Self {
        Self {
            conversation_id,
            sender,
            text: text.into(),
            created_at: Utc::now(),
        }
    }
}

/// Body of `POST /api/chat/message`.
///
/// Both fields are optional on the wire so that a missing `message` is
/// reported as a validation error instead of a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

impl SendMessageRequest {
    pub fn new(message: impl Into<String>, session_id: Option<String>) -> Self {
        Self {
            message: Some(message.into()),
            session_id,
        }
    }
}

/// Successful result of handling one user message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub reply: String,
    pub session_id: String,
}

/// One element of the history endpoint's response array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub sender: SenderRole,
    pub text: String,
}

impl From<StoredMessage> for HistoryEntry {
    fn from(message: StoredMessage) -> Self {
        Self {
            sender: message.sender,
            text: message.text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_role_roundtrip() {
        for role in [SenderRole::User, SenderRole::Assistant] {
            let s = role.to_string();
            let parsed: SenderRole = s.parse().unwrap();
            assert_eq!(role, parsed);
        }
    }

    #[test]
    fn test_legacy_ai_label_normalizes_to_assistant() {
        assert_eq!("ai".parse::<SenderRole>().unwrap(), SenderRole::Assistant);
        assert_eq!("AI".parse::<SenderRole>().unwrap(), SenderRole::Assistant);

        let parsed: SenderRole = serde_json::from_str("\"ai\"").unwrap();
        assert_eq!(parsed, SenderRole::Assistant);
        // Always written back in canonical form.
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"assistant\"");
    }

    #[test]
    fn test_sender_role_rejects_unknown() {
        assert!("system".parse::<SenderRole>().is_err());
        assert!("bot".parse::<SenderRole>().is_err());
    }

    #[test]
    fn test_sender_maps_to_prompt_role() {
        assert_eq!(MessageRole::from(SenderRole::User), MessageRole::User);
        assert_eq!(MessageRole::from(SenderRole::Assistant), MessageRole::Assistant);
    }

    #[test]
    fn test_send_message_request_camel_case() {
        let req: SendMessageRequest =
            serde_json::from_str(r#"{"message":"Hello","sessionId":"abc"}"#).unwrap();
        assert_eq!(req.message.as_deref(), Some("Hello"));
        assert_eq!(req.session_id.as_deref(), Some("abc"));
    }

    #[test]
    fn test_send_message_request_tolerates_missing_fields() {
        let req: SendMessageRequest = serde_json::from_str("{}").unwrap();
        assert!(req.message.is_none());
        assert!(req.session_id.is_none());

        let req: SendMessageRequest =
            serde_json::from_str(r#"{"message":"hi","sessionId":null}"#).unwrap();
        assert!(req.session_id.is_none());
    }

    #[test]
    fn test_chat_reply_serialize() {
        let reply = ChatReply {
            reply: "Hi there".to_string(),
            session_id: "0190-abc".to_string(),
        };
        let json = serde_json::to_string(&reply).unwrap();
        assert_eq!(json, r#"{"reply":"Hi there","sessionId":"0190-abc"}"#);
    }

    #[test]
    fn test_history_entry_from_stored() {
        let stored = StoredMessage {
            id: 7,
            conversation_id: Uuid::now_v7(),
            sender: SenderRole::Assistant,
            text: "Your order shipped.".to_string(),
            created_at: Utc::now(),
        };
        let entry = HistoryEntry::from(stored);
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"sender":"assistant","text":"Your order shipped."}"#);
    }

    #[test]
    fn test_new_conversation_ids_are_unique() {
        let a = Conversation::new();
        let b = Conversation::new();
        assert_ne!(a.id, b.id);
    }
}
