//! Transaction HTTP handlers.
//!
//! This module implements transaction-related API endpoints:
//! - POST /transactions - Record a transaction
//! - PUT /transactions/{id} - Update a transaction

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use super::{AppJson, parse_id};
use crate::{
    AppState,
    error::AppError,
    models::transaction::{CreateTransactionRequest, Transaction, UpdateTransactionRequest},
};

/// Record a transaction.
///
/// # Request Body
///
/// ```json
/// { "account_id": 1, "operation_type_id": 4, "amount": 123.45 }
/// ```
///
/// The event date is set by the server. The amount sign is corrected to
/// match the operation type.
///
/// # Response (201)
///
/// ```json
/// {
///   "id": 1,
///   "account_id": 1,
///   "operation_type_id": 4,
///   "amount": "123.45",
///   "event_date": "2025-01-05T09:34:18.589Z"
/// }
/// ```
pub async fn create_transaction(
    State(state): State<AppState>,
    AppJson(request): AppJson<CreateTransactionRequest>,
) -> Result<(StatusCode, Json<Transaction>), AppError> {
    let transaction = state
        .transactions
        .create_transaction(request.into())
        .await?;

    Ok((StatusCode::CREATED, Json(transaction)))
}

/// Update an existing transaction.
///
/// # Request Body
///
/// ```json
/// {
///   "account_id": 1,
///   "operation_type_id": 1,
///   "amount": 50,
///   "event_date": "2025-01-05T09:34:18Z"
/// }
/// ```
///
/// # Response
///
/// - **Success (200 OK)**: Returns the stored transaction after the merge
/// - **Error (400)**: Non-numeric id or validation failure
/// - **Error (404)**: Transaction not found
pub async fn update_transaction(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(request): AppJson<UpdateTransactionRequest>,
) -> Result<Json<Transaction>, AppError> {
    let id = parse_id(&id, "invalid transaction id")?;

    let transaction = state
        .transactions
        .update_transaction(request.into_transaction(id))
        .await?;

    Ok(Json(transaction))
}
