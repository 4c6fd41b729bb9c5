//! Health check endpoints for liveness and readiness probes.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::ApiResponse;
use crate::AppState;

/// Readiness probe detail.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub sessions: String,
    pub intents: usize,
}

/// Liveness probe — always returns OK if the process is running.
pub async fn live() -> &'static str {
    "OK"
}

/// Readiness probe — checks the session backend.
pub async fn ready(State(state): State<AppState>) -> Json<ApiResponse<HealthStatus>> {
    let store = state.bot.sessions();
    let sessions = match store.ping().await {
        Ok(()) => format!("{}: connected", store.backend()),
        Err(e) => {
            tracing::warn!(error = %e, backend = store.backend(), "Session store health check failed");
            format!("{}: error: {e}", store.backend())
        }
    };

    ApiResponse::success(HealthStatus {
        status: "ok".to_string(),
        sessions,
        intents: state.bot.intent_count(),
    })
}
