//! Service catalog HTTP handlers.
//!
//! Endpoints:
//! - GET  /api/v1/services        - The full catalog
//! - POST /api/v1/services/match  - Rank the catalog against a query

use axum::Json;
use axum::extract::State;
use serde::Deserialize;

use finchat_types::service::ServiceRecord;

use crate::http::error::AppError;
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub query: String,
    /// Defaults to the configured `top_k`.
    #[serde(default)]
    pub top_k: Option<usize>,
}

/// GET /api/v1/services
pub async fn list_services(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ServiceRecord>>>, AppError> {
    let timer = RequestTimer::start();
    let services = state.chat_service.services().await.to_vec();
    Ok(Json(timer.finish(services).with_link("match", "/api/v1/services/match")))
}

/// POST /api/v1/services/match
pub async fn match_services(
    State(state): State<AppState>,
    Json(body): Json<MatchRequest>,
) -> Result<Json<ApiResponse<Vec<ServiceRecord>>>, AppError> {
    let timer = RequestTimer::start();
    let shortlist = state.chat_service.shortlist(&body.query, body.top_k).await;
    Ok(Json(timer.finish(shortlist)))
}
