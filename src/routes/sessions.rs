//! Session history and reset endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::errors::{ApiResponse, AppError};
use crate::models::chat::{ClearResponse, HistoryResponse};
use crate::AppState;

/// GET /history/{session_id}
pub async fn history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<HistoryResponse>>, AppError> {
    let result = state.bot.history(&session_id).await?;
    Ok(ApiResponse::success(result))
}

/// GET /clear/{session_id} -- idempotent, unknown sessions are not an error.
pub async fn clear(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<ClearResponse>>, AppError> {
    state.bot.clear(&session_id).await?;
    Ok(ApiResponse::success(ClearResponse {
        status: "cleared".to_string(),
    }))
}
