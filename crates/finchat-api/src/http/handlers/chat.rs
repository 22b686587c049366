//! Chat turn endpoint.
//!
//! POST /api/v1/chat
//!
//! Runs one turn through the chat service. A missing or unknown
//! `session_id` creates a session; the response carries the id to reuse.
//! Offline and failed completions still return 200: the reply text says
//! what happened and `status` tells the two apart.

use axum::Json;
use axum::extract::State;
use serde::Deserialize;

use finchat_types::chat::ChatTurn;

use crate::http::error::AppError;
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::AppState;

use super::parse_uuid;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Existing session to continue.
    #[serde(default)]
    pub session_id: Option<String>,
    pub message: String,
}

/// POST /api/v1/chat - Send one user message and get the assistant reply.
pub async fn send_message(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ApiResponse<ChatTurn>>, AppError> {
    let timer = RequestTimer::start();

    if body.message.trim().is_empty() {
        return Err(AppError::Validation("message must not be empty".to_string()));
    }

    let session_id = body.session_id.as_deref().map(parse_uuid).transpose()?;
    let turn = state.chat_service.send_message(session_id, &body.message).await;

    let messages_link = format!("/api/v1/sessions/{}/messages", turn.session_id);
    let settings_link = format!("/api/v1/sessions/{}/settings", turn.session_id);
    let resp = timer
        .finish(turn)
        .with_link("messages", &messages_link)
        .with_link("settings", &settings_link);

    Ok(Json(resp))
}
