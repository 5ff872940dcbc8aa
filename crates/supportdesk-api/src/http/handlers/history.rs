//! GET /api/chat/history?sessionId=<id> - read a conversation back.

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use serde::Deserialize;
use supportdesk_types::chat::HistoryEntry;

use crate::http::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Messages of a session, oldest first. Absent, unknown, or unparseable ids
/// give `[]`.
pub async fn get_history(
    State(state): State<AppState>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> Result<Json<Vec<HistoryEntry>>, AppError> {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            tracing::debug!(%rejection, "Rejected history query");
            return Ok(Json(Vec::new()));
        }
    };
    let history = state
        .chat_service
        .get_history(query.session_id.as_deref())
        .await?;
    Ok(Json(history))
}
