//! Health check endpoint for service monitoring.

use axum::{Json, extract::State};

use crate::{
    AppState,
    error::{AppError, MessageResponse},
};

/// Health check handler.
///
/// # Response (200 OK)
///
/// ```json
/// { "message": "service is healthy" }
/// ```
///
/// # Response (500 Internal Server Error)
///
/// ```json
/// { "message": "service is unhealthy" }
/// ```
pub async fn health_check(State(state): State<AppState>) -> Result<Json<MessageResponse>, AppError> {
    state.health.check().await?;

    Ok(Json(MessageResponse {
        message: "service is healthy".to_string(),
    }))
}
