//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body, URL params, etc.)
//! 2. Delegates to a service
//! 3. Returns HTTP response (JSON, status code)

use axum::extract::FromRequest;

use crate::error::AppError;

/// Account management endpoints
pub mod accounts;
/// Liveness endpoint
pub mod health;
/// Operation type registry endpoints
pub mod operation_types;
/// Transaction endpoints
pub mod transactions;

/// JSON body extractor whose rejections render as `{"message": ...}` with 400.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Parse a numeric id from a path segment.
///
/// Non-numeric input is reported with `message` (e.g. "invalid account id").
pub(crate) fn parse_id(raw: &str, message: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .map_err(|_| AppError::InvalidRequest(message.to_string()))
}
