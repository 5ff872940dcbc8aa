//! POST /api/chat/message - send one user message, receive the reply.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use supportdesk_types::chat::{ChatReply, SendMessageRequest};
use supportdesk_types::error::ChatError;

use crate::http::error::AppError;
use crate::state::AppState;

/// Handle one widget message.
///
/// A body that is not JSON, or is JSON of the wrong shape, is treated like a
/// missing message. Oversized bodies and a missing JSON content type get
/// their own 413 and 415 responses.
pub async fn send_message(
    State(state): State<AppState>,
    payload: Result<Json<SendMessageRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, AppError> {
    let Json(request) = payload.map_err(rejection_to_error)?;

    let reply = state.chat_service.handle_message(request).await?;
    Ok(Json(reply))
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    tracing::debug!(%rejection, "Rejected message body");
    match rejection {
        JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
            AppError::Validation(ChatError::EMPTY_MESSAGE.to_string())
        }
        JsonRejection::MissingJsonContentType(_) => AppError::UnsupportedMediaType,
        other if other.status() == StatusCode::PAYLOAD_TOO_LARGE => AppError::PayloadTooLarge,
        other => AppError::Validation(other.body_text()),
    }
}
