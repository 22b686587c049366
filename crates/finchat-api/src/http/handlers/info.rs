//! GET /api/v1/info - Title, caption, deployment note and footer.

use axum::Json;
use axum::extract::State;

use crate::http::error::AppError;
use crate::http::response::{ApiResponse, RequestTimer};
use crate::info::AppInfo;
use crate::state::AppState;

pub async fn get_info(State(state): State<AppState>) -> Result<Json<ApiResponse<AppInfo>>, AppError> {
    let timer = RequestTimer::start();
    let info = AppInfo::new(
        &state.config.firm.firm_name,
        state.chat_service.client().is_configured(),
    );
    Ok(Json(
        timer
            .finish(info)
            .with_link("services", "/api/v1/services")
            .with_link("chat", "/api/v1/chat"),
    ))
}
