//! Chat endpoint.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::errors::{ApiResponse, AppError};
use crate::models::chat::{ChatReply, ChatRequest};
use crate::AppState;

/// POST /chat
pub async fn send(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<ChatReply>>, AppError> {
    let Json(body) = payload.map_err(|rejection| AppError::Validation(rejection.body_text()))?;
    let body = body.trimmed();
    body.validate()?;

    let session_id = body
        .session_id
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let reply = state.bot.handle(&session_id, &body.message).await?;
    Ok(ApiResponse::success(reply))
}
