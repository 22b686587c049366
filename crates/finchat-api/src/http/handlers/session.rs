//! Session HTTP handlers.
//!
//! Endpoints:
//! - POST   /api/v1/sessions                - Create a session
//! - GET    /api/v1/sessions/{id}           - Session metadata
//! - GET    /api/v1/sessions/{id}/messages  - Visible transcript
//! - GET    /api/v1/sessions/{id}/settings  - Firm settings
//! - PUT    /api/v1/sessions/{id}/settings  - Update firm settings
//! - DELETE /api/v1/sessions/{id}           - Tear the session down

use axum::Json;
use axum::extract::{Path, State};

use finchat_types::chat::{FirmSettings, FirmSettingsPatch, Message, SessionInfo};

use crate::http::error::AppError;
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::AppState;

use super::parse_uuid;

/// POST /api/v1/sessions - Create an empty session with the default settings.
pub async fn create_session(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<SessionInfo>>, AppError> {
    let timer = RequestTimer::start();

    let id = state.chat_service.create_session();
    let info = state.chat_service.session_info(&id).await?;

    let resp = timer
        .finish(info)
        .with_link("self", &format!("/api/v1/sessions/{id}"))
        .with_link("messages", &format!("/api/v1/sessions/{id}/messages"));

    Ok(Json(resp))
}

/// GET /api/v1/sessions/{id} - Session metadata.
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<SessionInfo>>, AppError> {
    let timer = RequestTimer::start();
    let sid = parse_uuid(&session_id)?;

    let info = state.chat_service.session_info(&sid).await?;

    let resp = timer
        .finish(info)
        .with_link("self", &format!("/api/v1/sessions/{sid}"))
        .with_link("messages", &format!("/api/v1/sessions/{sid}/messages"));

    Ok(Json(resp))
}

/// GET /api/v1/sessions/{id}/messages - User and assistant messages in order.
pub async fn get_messages(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<Message>>>, AppError> {
    let timer = RequestTimer::start();
    let sid = parse_uuid(&session_id)?;

    let messages = state.chat_service.transcript(&sid).await?;

    let resp = timer
        .finish(messages)
        .with_link("self", &format!("/api/v1/sessions/{sid}/messages"))
        .with_link("session", &format!("/api/v1/sessions/{sid}"));

    Ok(Json(resp))
}

/// GET /api/v1/sessions/{id}/settings
pub async fn get_settings(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<FirmSettings>>, AppError> {
    let timer = RequestTimer::start();
    let sid = parse_uuid(&session_id)?;

    let settings = state.chat_service.settings(&sid).await?;
    Ok(Json(timer.finish(settings)))
}

/// PUT /api/v1/sessions/{id}/settings - Partial update; blank fields are ignored.
pub async fn update_settings(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(patch): Json<FirmSettingsPatch>,
) -> Result<Json<ApiResponse<FirmSettings>>, AppError> {
    let timer = RequestTimer::start();
    let sid = parse_uuid(&session_id)?;

    let settings = state.chat_service.update_settings(&sid, patch).await?;
    Ok(Json(timer.finish(settings)))
}

/// DELETE /api/v1/sessions/{id}
pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let timer = RequestTimer::start();
    let sid = parse_uuid(&session_id)?;

    if !state.chat_service.end_session(&sid) {
        return Err(AppError::SessionNotFound(sid));
    }

    Ok(Json(timer.finish(serde_json::json!({"deleted": true}))))
}
