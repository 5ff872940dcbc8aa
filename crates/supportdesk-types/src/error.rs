use thiserror::Error;

use crate::llm::LlmError;

/// Errors from repository operations (used by trait definitions in supportdesk-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("conflict: {0}")]
    Conflict(String),
}

/// Errors surfaced by the conversation orchestrator.
///
/// Each variant maps to one HTTP status class in the API layer:
/// `Validation` is the caller's fault, everything else is a server-side failure.
#[derive(Debug, Error)]
pub enum ChatError {
    /// Empty or missing input, or a malformed identifier. No side effects occurred.
    #[error("{0}")]
    Validation(String),

    /// Session creation, message write, or history read failed.
    #[error("store error: {0}")]
    Store(#[from] RepositoryError),

    /// The completion service could not produce a reply.
    #[error("completion service unavailable: {0}")]
    UpstreamUnavailable(#[from] LlmError),

    /// A required credential or setting is missing.
    #[error("not configured: {0}")]
    NotConfigured(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ChatError {
    /// Message returned for an empty or whitespace-only user message.
    pub const EMPTY_MESSAGE: &'static str = "Message cannot be empty";

    /// Message returned for a session id that is not a UUID.
    pub const INVALID_SESSION: &'static str = "Invalid session id";

    pub fn empty_message() -> Self {
        ChatError::Validation(Self::EMPTY_MESSAGE.to_string())
    }

    pub fn invalid_session() -> Self {
        ChatError::Validation(Self::INVALID_SESSION.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }

    #[test]
    fn test_validation_error_display_is_bare_message() {
        assert_eq!(ChatError::empty_message().to_string(), "Message cannot be empty");
        assert_eq!(ChatError::invalid_session().to_string(), "Invalid session id");
    }

    #[test]
    fn test_store_error_from_repository_error() {
        let err: ChatError = RepositoryError::Connection.into();
        assert!(matches!(err, ChatError::Store(RepositoryError::Connection)));
        assert_eq!(err.to_string(), "store error: database connection error");
    }

    #[test]
    fn test_upstream_error_from_llm_error() {
        let err: ChatError = LlmError::AuthenticationFailed.into();
        assert!(matches!(err, ChatError::UpstreamUnavailable(_)));
    }
}
