//! Account management HTTP handlers.
//!
//! This module implements the account-related API endpoints:
//! - POST /accounts - Create new account
//! - GET /accounts/{id} - Get account by ID
//! - GET /accounts/{id}/balance - Sum of the account's transactions

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use super::{AppJson, parse_id};
use crate::{
    AppState,
    error::AppError,
    models::account::{Account, BalanceResponse, CreateAccountRequest},
};

/// Create a new account.
///
/// # Request Body
///
/// ```json
/// { "document_number": "12345678900" }
/// ```
///
/// # Response
///
/// - **Success (201 Created)**: Returns the created account
/// - **Error (400)**: Malformed body or missing document number
/// - **Error (500)**: Database error
pub async fn create_account(
    State(state): State<AppState>,
    AppJson(request): AppJson<CreateAccountRequest>,
) -> Result<(StatusCode, Json<Account>), AppError> {
    let account = state.accounts.create_account(request).await?;

    Ok((StatusCode::CREATED, Json(account)))
}

/// Get a specific account by ID.
///
/// # Response
///
/// - **Success (200 OK)**: `{"id": 1, "document_number": "12345678900"}`
/// - **Error (400)**: Non-numeric id
/// - **Error (404)**: Account not found
/// - **Error (500)**: Database error
pub async fn get_account(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Account>, AppError> {
    let id = parse_id(&id, "invalid account id")?;

    let account = state
        .accounts
        .get_account_by_id(id)
        .await?
        .ok_or(AppError::AccountNotFound)?;

    Ok(Json(account))
}

/// Get the balance of an account.
///
/// # Response (200 OK)
///
/// ```json
/// { "account_id": 1, "balance": "25" }
/// ```
///
/// Unknown accounts are reported as 404 instead of a zero balance.
pub async fn get_account_balance(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BalanceResponse>, AppError> {
    let id = parse_id(&id, "invalid account id")?;

    // Verify the account exists
    state
        .accounts
        .get_account_by_id(id)
        .await?
        .ok_or(AppError::AccountNotFound)?;

    let balance = state.accounts.get_account_balance(id).await?;

    Ok(Json(BalanceResponse {
        account_id: id,
        balance,
    }))
}
