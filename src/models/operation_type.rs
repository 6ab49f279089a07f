//! Operation type models.
//!
//! An operation type is a named category of transaction that carries a
//! policy on the sign of its amount (purchases and withdrawals are stored as
//! negative amounts, payments as positive ones).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Sign policy and description of one operation type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationType {
    pub description: String,

    /// When true, amounts are stored positive; otherwise negative.
    #[serde(rename = "positive_amount")]
    pub positive_amount_required: bool,
}

/// All known operation types keyed by their store-assigned id.
pub type OperationTypes = HashMap<i64, OperationType>;

/// Row of the `operation_types` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OperationTypeRecord {
    pub id: i64,
    pub description: String,
    pub positive_amount: bool,
}

impl OperationTypeRecord {
    /// Split the row into a registry key and its policy.
    pub fn into_entry(self) -> (i64, OperationType) {
        (
            self.id,
            OperationType {
                description: self.description,
                positive_amount_required: self.positive_amount,
            },
        )
    }
}

/// Request body for registering a new operation type.
///
/// ```json
/// { "description": "PAGAMENTO", "positive_amount": true }
/// ```
#[derive(Debug, Deserialize)]
pub struct CreateOperationTypeRequest {
    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub positive_amount: bool,
}

impl From<CreateOperationTypeRequest> for OperationType {
    fn from(request: CreateOperationTypeRequest) -> Self {
        Self {
            description: request.description,
            positive_amount_required: request.positive_amount,
        }
    }
}

/// Operation type as listed by `GET /operation-types`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct OperationTypeResponse {
    pub id: i64,
    pub description: String,
    pub positive_amount: bool,
}

impl OperationTypeResponse {
    /// Flatten a snapshot into a list ordered by id.
    pub fn list(op_types: &OperationTypes) -> Vec<Self> {
        let mut list: Vec<Self> = op_types
            .iter()
            .map(|(id, op)| Self {
                id: *id,
                description: op.description.clone(),
                positive_amount: op.positive_amount_required,
            })
            .collect();
        list.sort_by_key(|op| op.id);
        list
    }
}
