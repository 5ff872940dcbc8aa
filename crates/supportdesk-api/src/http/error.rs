//! Application error type mapping to HTTP status codes and `{ error, code }` bodies.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use supportdesk_types::error::ChatError;

/// Client-facing text for a failed completion call.
pub const UPSTREAM_MESSAGE: &str = "AI service is temporarily unavailable";

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Errors from the chat service.
    Chat(ChatError),
    /// Malformed request that never reached the service.
    Validation(String),
    /// Request body over the extractor's size limit.
    PayloadTooLarge,
    /// Message body sent without a JSON content type.
    UnsupportedMediaType,
    MethodNotAllowed,
    NotFound,
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        AppError::Chat(e)
    }
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Chat(ChatError::Validation(msg)) | AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Chat(ChatError::Store(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "STORE_ERROR",
                "Failed to load or save the conversation".to_string(),
            ),
            AppError::Chat(ChatError::UpstreamUnavailable(_)) => (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_UNAVAILABLE",
                UPSTREAM_MESSAGE.to_string(),
            ),
            AppError::Chat(ChatError::NotConfigured(msg)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "NOT_CONFIGURED", msg.clone())
            }
            AppError::Chat(ChatError::Internal(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "Internal server error".to_string(),
            ),
            AppError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                "Message too large".to_string(),
            ),
            AppError::UnsupportedMediaType => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "UNSUPPORTED_MEDIA_TYPE",
                "Expected request with `Content-Type: application/json`".to_string(),
            ),
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "METHOD_NOT_ALLOWED",
                "Method Not Allowed".to_string(),
            ),
            AppError::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND", "Not Found".to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        if status.is_server_error() {
            match &self {
                AppError::Chat(e) => tracing::error!(code, error = %e, "Request failed"),
                other => tracing::error!(code, error = ?other, "Request failed"),
            }
        }

        (status, Json(json!({ "error": message, "code": code }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use supportdesk_types::error::RepositoryError;
    use supportdesk_types::llm::LlmError;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::from(ChatError::empty_message()), StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            (
                AppError::from(ChatError::Store(RepositoryError::Connection)),
                StatusCode::INTERNAL_SERVER_ERROR,
                "STORE_ERROR",
            ),
            (
                AppError::from(ChatError::UpstreamUnavailable(LlmError::AuthenticationFailed)),
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_UNAVAILABLE",
            ),
            (
                AppError::from(ChatError::NotConfigured("set GROQ_API_KEY".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
                "NOT_CONFIGURED",
            ),
            (
                AppError::from(ChatError::Internal("boom".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
            ),
            (AppError::PayloadTooLarge, StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE"),
            (
                AppError::UnsupportedMediaType,
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "UNSUPPORTED_MEDIA_TYPE",
            ),
            (AppError::MethodNotAllowed, StatusCode::METHOD_NOT_ALLOWED, "METHOD_NOT_ALLOWED"),
            (AppError::NotFound, StatusCode::NOT_FOUND, "NOT_FOUND"),
        ];

        for (error, status, code) in cases {
            let (got_status, got_code, _) = error.parts();
            assert_eq!(got_status, status);
            assert_eq!(got_code, code);
        }
    }

    #[test]
    fn test_internal_details_are_not_exposed() {
        let err = AppError::from(ChatError::Store(RepositoryError::Query(
            "no such table: messages".to_string(),
        )));
        let (_, _, message) = err.parts();
        assert!(!message.contains("no such table"));

        let err = AppError::from(ChatError::UpstreamUnavailable(LlmError::Provider {
            message: "HTTP 500 from upstream".to_string(),
        }));
        assert_eq!(err.parts().2, UPSTREAM_MESSAGE);
    }
}
