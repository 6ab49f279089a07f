//! Transaction data models and API request/response types.
//!
//! This module defines:
//! - `Transaction`: Database entity representing a ledger entry
//! - `TransactionFilter`: Query descriptor for the repository
//! - Request types for creating and updating transactions
//! - The validation and sign normalization rules applied before persisting

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{error::ValidationError, models::operation_type::OperationTypes};

/// Represents a transaction record from the database.
///
/// Zero-valued fields (`0`, `Decimal::ZERO`, `None`) mean "unset". The
/// store assigns `id`; the transaction service stamps `event_date` on
/// creation.
///
/// # JSON Example
///
/// ```json
/// {
///   "id": 12,
///   "account_id": 1,
///   "operation_type_id": 1,
///   "amount": "-100",
///   "event_date": "2025-01-05T09:34:18.589Z"
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, sqlx::FromRow, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub account_id: i64,
    pub operation_type_id: i64,

    /// Signed amount; the sign follows the operation type's policy once validated.
    pub amount: Decimal,

    pub event_date: Option<DateTime<Utc>>,
}

/// Query descriptor for transactions.
///
/// Fields left as `None` impose no constraint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    pub id: Option<i64>,
    pub account_id: Option<i64>,
    pub operation_type_id: Option<i64>,
    pub amount: Option<Decimal>,
    pub event_date: Option<DateTime<Utc>>,
}

impl TransactionFilter {
    pub fn by_id(id: i64) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    pub fn by_account(account_id: i64) -> Self {
        Self {
            account_id: Some(account_id),
            ..Self::default()
        }
    }
}

impl Transaction {
    /// Check the transaction against the registry and normalize its sign.
    ///
    /// Checks run in order and stop at the first failure:
    ///
    /// 1. `account_id` must be positive
    /// 2. `amount` must be non-zero
    /// 3. `event_date` must be set
    /// 4. `operation_type_id` must exist in `op_types`
    ///
    /// An amount whose sign disagrees with the operation type's policy is
    /// negated rather than rejected.
    pub fn validate(mut self, op_types: &OperationTypes) -> Result<Self, ValidationError> {
        if self.account_id <= 0 {
            return Err(ValidationError::InvalidAccountId);
        }
        if self.amount.is_zero() {
            return Err(ValidationError::InvalidAmount);
        }
        if self.event_date.is_none() {
            return Err(ValidationError::InvalidEventDate);
        }
        let op = op_types
            .get(&self.operation_type_id)
            .ok_or(ValidationError::InvalidOperationTypeId)?;

        let is_positive = self.amount > Decimal::ZERO;
        if is_positive != op.positive_amount_required {
            self.amount = -self.amount;
        }

        Ok(self)
    }

    /// Overwrite fields with the set (non-zero) fields of `changes`.
    ///
    /// `id` is never touched.
    pub fn merge(&mut self, changes: &Transaction) {
        if changes.account_id != 0 {
            self.account_id = changes.account_id;
        }
        if changes.operation_type_id != 0 {
            self.operation_type_id = changes.operation_type_id;
        }
        if !changes.amount.is_zero() {
            self.amount = changes.amount;
        }
        if changes.event_date.is_some() {
            self.event_date = changes.event_date;
        }
    }
}

/// Request body for `POST /transactions`.
///
/// Missing fields default to zero and are reported by validation with a
/// specific reason.
///
/// ```json
/// { "account_id": 1, "operation_type_id": 4, "amount": 123.45 }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTransactionRequest {
    #[serde(default)]
    pub account_id: i64,

    #[serde(default)]
    pub operation_type_id: i64,

    #[serde(default)]
    pub amount: Decimal,
}

impl From<CreateTransactionRequest> for Transaction {
    fn from(request: CreateTransactionRequest) -> Self {
        Self {
            id: 0,
            account_id: request.account_id,
            operation_type_id: request.operation_type_id,
            amount: request.amount,
            event_date: None,
        }
    }
}

/// Request body for `PUT /transactions/{id}`.
///
/// Unlike creation, the event date is taken from the client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTransactionRequest {
    #[serde(default)]
    pub account_id: i64,

    #[serde(default)]
    pub operation_type_id: i64,

    #[serde(default)]
    pub amount: Decimal,

    #[serde(default)]
    pub event_date: Option<DateTime<Utc>>,
}

impl UpdateTransactionRequest {
    pub fn into_transaction(self, id: i64) -> Transaction {
        Transaction {
            id,
            account_id: self.account_id,
            operation_type_id: self.operation_type_id,
            amount: self.amount,
            event_date: self.event_date,
        }
    }
}
