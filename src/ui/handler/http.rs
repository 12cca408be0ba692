//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    domain::RoomName, infrastructure::dto::http::MessageDto, ui::state::AppState,
    usecase::HISTORY_REPLAY_LIMIT,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Recent messages for a room, oldest first.
///
/// Reads through the same persistence gateway as the live pipeline, so the
/// REST view and the in-session history replay can never disagree.
pub async fn get_room_messages(
    State(state): State<Arc<AppState>>,
    Path(room): Path<String>,
) -> Result<Json<Vec<MessageDto>>, StatusCode> {
    let room = RoomName::new(&room).map_err(|_| StatusCode::BAD_REQUEST)?;

    match state.messages.query_recent(&room, HISTORY_REPLAY_LIMIT).await {
        Ok(messages) => Ok(Json(messages.into_iter().map(MessageDto::from).collect())),
        Err(e) => {
            tracing::error!(room = %room, "failed to fetch messages: {e}");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
