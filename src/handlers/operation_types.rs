//! Operation type HTTP handlers.
//!
//! - GET /operation-types - List the registry snapshot
//! - POST /operation-types - Register a new operation type

use axum::{Json, extract::State, http::StatusCode};

use super::AppJson;
use crate::{
    AppState,
    error::AppError,
    models::operation_type::{CreateOperationTypeRequest, OperationTypeResponse},
};

/// List operation types ordered by id.
pub async fn list_operation_types(
    State(state): State<AppState>,
) -> Json<Vec<OperationTypeResponse>> {
    let op_types = state.operation_types.get_all().await;

    Json(OperationTypeResponse::list(&op_types))
}

/// Register an operation type.
///
/// # Request Body
///
/// ```json
/// { "description": "PAGAMENTO", "positive_amount": true }
/// ```
pub async fn create_operation_type(
    State(state): State<AppState>,
    AppJson(request): AppJson<CreateOperationTypeRequest>,
) -> Result<StatusCode, AppError> {
    state.operation_types.create(request.into()).await?;

    Ok(StatusCode::CREATED)
}
