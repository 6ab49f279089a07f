//! Account data models and API request/response types.
//!
//! This module defines:
//! - `Account`: Database entity representing an account
//! - `AccountFilter`: Query descriptor for the repository
//! - `CreateAccountRequest`: Request body for creating accounts
//! - `BalanceResponse`: Response body for the balance endpoint

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents an account record from the database.
///
/// Accounts are created once and never mutated afterwards.
///
/// # JSON Example
///
/// ```json
/// { "id": 1, "document_number": "12345678900" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize, Deserialize)]
pub struct Account {
    /// Store-assigned identifier (always > 0 once persisted)
    pub id: i64,

    /// Holder's document number, never empty
    pub document_number: String,
}

/// Query descriptor for accounts.
///
/// Fields left as `None` impose no constraint, so `AccountFilter::default()`
/// matches every account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountFilter {
    pub id: Option<i64>,
    pub document_number: Option<String>,
}

impl AccountFilter {
    pub fn by_id(id: i64) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }
}

/// Request body for creating a new account.
///
/// A missing `document_number` deserializes as empty and is rejected by the
/// account service.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateAccountRequest {
    #[serde(default)]
    pub document_number: String,
}

/// Response body for `GET /accounts/{id}/balance`.
///
/// `balance` is serialized as a decimal string to keep full precision.
#[derive(Debug, Serialize, Deserialize)]
pub struct BalanceResponse {
    pub account_id: i64,
    pub balance: Decimal,
}
