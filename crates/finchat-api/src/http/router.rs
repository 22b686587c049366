//! Axum router configuration with middleware.
//!
//! All resource routes are under `/api/v1/`; `/health` sits at the root.
//! Middleware: CORS, request tracing.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/info", get(handlers::info::get_info))
        // Catalog
        .route("/services", get(handlers::service::list_services))
        .route("/services/match", post(handlers::service::match_services))
        // Turns
        .route("/chat", post(handlers::chat::send_message))
        // Sessions
        .route("/sessions", post(handlers::session::create_session))
        .route(
            "/sessions/{id}",
            get(handlers::session::get_session).delete(handlers::session::delete_session),
        )
        .route("/sessions/{id}/messages", get(handlers::session::get_messages))
        .route(
            "/sessions/{id}/settings",
            get(handlers::session::get_settings).put(handlers::session::update_settings),
        );

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Liveness plus whether a completion provider is configured.
async fn health_check(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "provider": state.chat_service.client().provider_name(),
    }))
}
