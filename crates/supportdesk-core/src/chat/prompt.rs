//! Prompt assembly for the support agent.
//!
//! Layout of every completion request:
//! ```text
//! system:    {system_prompt}
//! user/asst: ...last N stored turns, oldest first...
//! user:      {current message}
//! ```

use supportdesk_types::chat::StoredMessage;
use supportdesk_types::llm::{CompletionRequest, Message};

use super::service::ChatSettings;

/// Keep at most `window` of the most recent turns, ordered by ordinal.
///
/// The repository already returns an ordered window; this re-applies both
/// constraints so the prompt never depends on the store's row order.
pub fn select_window(mut history: Vec<StoredMessage>, window: usize) -> Vec<StoredMessage> {
    history.sort_by_key(|m| m.id);
    let excess = history.len().saturating_sub(window);
    history.drain(..excess);
    history
}

/// Map stored turns to the completion service's role vocabulary.
pub fn history_to_messages(history: &[StoredMessage]) -> Vec<Message> {
    history
        .iter()
        .map(|m| Message {
            role: m.sender.into(),
            content: m.text.clone(),
        })
        .collect()
}

/// Build the completion request for one user turn.
pub fn build_completion_request(
    settings: &ChatSettings,
    history: Vec<StoredMessage>,
    current_message: &str,
) -> CompletionRequest {
    let window = select_window(history, settings.history_window as usize);
    let mut messages = history_to_messages(&window);
    messages.push(Message::user(current_message));

    CompletionRequest {
        model: settings.model.clone(),
        messages,
        system: Some(settings.system_prompt.clone()),
        max_tokens: settings.max_tokens,
        temperature: Some(settings.temperature),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use supportdesk_types::chat::SenderRole;
    use supportdesk_types::llm::MessageRole;
    use uuid::Uuid;

    fn stored(id: i64, sender: SenderRole, text: &str) -> StoredMessage {
        StoredMessage {
            id,
            conversation_id: Uuid::nil(),
            sender,
            text: text.to_string(),
            created_at: Utc::now(),
        }
    }

    fn settings(window: u32) -> ChatSettings {
        ChatSettings {
            history_window: window,
            ..ChatSettings::default()
        }
    }

    #[test]
    fn test_request_layout() {
        let history = vec![
            stored(1, SenderRole::User, "Where is my order?"),
            stored(2, SenderRole::Assistant, "Can you share the order number?"),
        ];
        let request = build_completion_request(&settings(10), history, "It's #1234");

        assert_eq!(request.messages.len(), 3);
        assert_eq!(request.messages[0].role, MessageRole::User);
        assert_eq!(request.messages[1].role, MessageRole::Assistant);
        assert_eq!(request.messages[2], Message::user("It's #1234"));
        assert!(
            request
                .system
                .as_deref()
                .unwrap()
                .contains("support assistant")
        );
        assert_eq!(request.max_tokens, 500);
        assert_eq!(request.model, "llama-3.3-70b-versatile");
    }

    #[test]
    fn test_window_keeps_most_recent_in_order() {
        let history: Vec<StoredMessage> = (1..=8)
            .map(|i| stored(i, SenderRole::User, &format!("m{i}")))
            .collect();
        let request = build_completion_request(&settings(3), history, "now");

        let contents: Vec<&str> = request.messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["m6", "m7", "m8", "now"]);
    }

    #[test]
    fn test_window_reorders_by_ordinal() {
        let history = vec![
            stored(5, SenderRole::Assistant, "third"),
            stored(2, SenderRole::User, "first"),
            stored(3, SenderRole::Assistant, "second"),
        ];
        let window = select_window(history, 10);
        let ids: Vec<i64> = window.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![2, 3, 5]);
    }

    #[test]
    fn test_zero_window_sends_only_current_turn() {
        let history = vec![stored(1, SenderRole::User, "old")];
        let request = build_completion_request(&settings(0), history, "fresh");
        assert_eq!(request.messages, vec![Message::user("fresh")]);
    }
}
