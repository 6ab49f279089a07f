//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::repository::TRANSACTION_ACCOUNT_FK;

/// JSON body `{"message": ...}` used by error responses and the health endpoint.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Reasons a transaction is rejected by [`crate::models::transaction::Transaction::validate`].
///
/// Checks run in declaration order and stop at the first failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid account id")]
    InvalidAccountId,

    #[error("invalid amount")]
    InvalidAmount,

    #[error("invalid event date")]
    InvalidEventDate,

    #[error("invalid operation type id")]
    InvalidOperationTypeId,
}

/// Application-wide error type.
///
/// Each variant maps to exactly one HTTP status class:
///
/// - **Input errors** (400): validation failures, missing document number, malformed requests
/// - **Not found** (404): unknown account or transaction
/// - **Infrastructure** (500): database failures and failed health checks
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed (e.g., connection error, query error).
    ///
    /// The wrapped error is logged server-side and never sent to the client.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Transaction failed one of the validation rules.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Account creation without a document number.
    #[error("missing document number")]
    MissingDocumentNumber,

    #[error("account not found")]
    AccountNotFound,

    /// Update targeted a transaction id that does not exist.
    #[error("transaction not found")]
    TransactionNotFound,

    /// Request body or parameters are invalid.
    ///
    /// The String contains details about what was invalid.
    #[error("{0}")]
    InvalidRequest(String),

    /// The store could not be reached by the health check.
    #[error("service is unhealthy")]
    Unhealthy,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_)
            | AppError::MissingDocumentNumber
            | AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::AccountNotFound | AppError::TransactionNotFound => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Unhealthy => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Classify a failed transaction insert or update.
    ///
    /// A violated account foreign key means the transaction references an
    /// account that does not exist, so it is reported as an invalid account id.
    pub fn from_transaction_write(err: sqlx::Error) -> Self {
        let missing_account = matches!(
            &err,
            sqlx::Error::Database(db)
                if db.is_foreign_key_violation() && db.constraint() == Some(TRANSACTION_ACCOUNT_FK)
        );

        if missing_account {
            AppError::Validation(ValidationError::InvalidAccountId)
        } else {
            AppError::Database(err)
        }
    }
}

/// Malformed or mistyped JSON bodies are client errors.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

/// Convert AppError into an HTTP response.
///
/// # Response Format
///
/// All errors return JSON in this format:
/// ```json
/// { "message": "Human-readable error message" }
/// ```
///
/// Database errors are replaced with a generic message; the detail only
/// reaches the logs.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match self {
            // Services log the underlying error with request context
            AppError::Database(_) => "an internal error occurred".to_string(),
            _ => self.to_string(),
        };

        (status, Json(MessageResponse { message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use std::{borrow::Cow, error::Error as StdError, fmt};

    use super::*;
    use http_body_util::BodyExt;
    use sqlx::error::{DatabaseError, ErrorKind};

    /// Stand-in for a driver error reporting a violated constraint.
    #[derive(Debug)]
    struct ConstraintViolation {
        constraint: &'static str,
        foreign_key: bool,
    }

    impl fmt::Display for ConstraintViolation {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "violates constraint \"{}\"", self.constraint)
        }
    }

    impl StdError for ConstraintViolation {}

    impl DatabaseError for ConstraintViolation {
        fn message(&self) -> &str {
            "constraint violated"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(if self.foreign_key { "23503" } else { "23514" }))
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn constraint(&self) -> Option<&str> {
            Some(self.constraint)
        }

        fn kind(&self) -> ErrorKind {
            if self.foreign_key {
                ErrorKind::ForeignKeyViolation
            } else {
                ErrorKind::CheckViolation
            }
        }
    }

    fn violation(constraint: &'static str, foreign_key: bool) -> sqlx::Error {
        sqlx::Error::Database(Box::new(ConstraintViolation {
            constraint,
            foreign_key,
        }))
    }

    async fn body(err: AppError) -> (StatusCode, MessageResponse) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn validation_errors_are_bad_requests() {
        let err = AppError::from(ValidationError::InvalidAmount);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "invalid amount");
    }

    #[test]
    fn not_found_variants_map_to_404() {
        assert_eq!(AppError::AccountNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::TransactionNotFound.status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn database_error_does_not_leak_detail() {
        let (status, body) = body(AppError::Database(sqlx::Error::PoolTimedOut)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.message, "an internal error occurred");
    }

    #[tokio::test]
    async fn error_body_carries_the_message() {
        let (status, body) = body(ValidationError::InvalidAmount.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            MessageResponse {
                message: "invalid amount".to_string(),
            }
        );
    }

    #[test]
    fn missing_account_on_write_is_invalid_account_id() {
        let err = AppError::from_transaction_write(violation(TRANSACTION_ACCOUNT_FK, true));
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::InvalidAccountId)
        ));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn other_write_failures_stay_database_errors() {
        for err in [
            violation("transactions_operation_type_id_fkey", true),
            violation("transactions_amount_check", false),
            sqlx::Error::PoolTimedOut,
        ] {
            assert!(matches!(
                AppError::from_transaction_write(err),
                AppError::Database(_)
            ));
        }
    }
}
