//! Transaction service - Core business logic for ledger entries.
//!
//! This service handles:
//! - Stamping the event date from the injected clock
//! - Validation and sign normalization against the operation type registry
//! - Persisting new transactions
//! - Updating existing transactions by merging in the changed fields
//!
//! Validation failures are client errors and are logged at `warn`;
//! repository failures are infrastructure errors and are logged at `error`.

use std::sync::Arc;

use crate::{
    clock::Clock,
    error::AppError,
    models::transaction::{Transaction, TransactionFilter},
    repository::Repository,
    services::operation_type_registry::OperationTypeRegistry,
};

#[derive(Clone)]
pub struct TransactionService {
    clock: Arc<dyn Clock>,
    repo: Arc<dyn Repository>,
    op_types: OperationTypeRegistry,
}

impl TransactionService {
    pub fn new(
        clock: Arc<dyn Clock>,
        repo: Arc<dyn Repository>,
        op_types: OperationTypeRegistry,
    ) -> Self {
        Self {
            clock,
            repo,
            op_types,
        }
    }

    /// Record a new transaction.
    ///
    /// # Process
    ///
    /// 1. Overwrite the event date with the clock's current time
    /// 2. Validate and normalize the amount sign
    /// 3. Insert the normalized transaction
    ///
    /// # Errors
    ///
    /// - `Validation`: the transaction breaks a validation rule, or its account
    ///   does not exist (nothing is written)
    /// - `Database`: the insert failed
    pub async fn create_transaction(&self, mut tx: Transaction) -> Result<Transaction, AppError> {
        tx.event_date = Some(self.clock.now());
        let (account_id, operation_type_id) = (tx.account_id, tx.operation_type_id);

        let op_types = self.op_types.get_all().await;
        let tx = tx.validate(&op_types).map_err(|err| {
            tracing::warn!(
                error = %err,
                account_id,
                operation_type_id,
                "error validating transaction"
            );
            err
        })?;

        let created = self
            .repo
            .create_transaction(&tx)
            .await
            .map_err(|err| match AppError::from_transaction_write(err) {
                AppError::Validation(err) => {
                    tracing::warn!(error = %err, account_id, "transaction for unknown account");
                    AppError::Validation(err)
                }
                err => {
                    tracing::error!(
                        error = %err,
                        account_id,
                        operation_type_id,
                        "error creating transaction"
                    );
                    err
                }
            })?;

        tracing::info!(
            transaction_id = created.id,
            account_id = created.account_id,
            "transaction created"
        );
        Ok(created)
    }

    /// Update an existing transaction.
    ///
    /// # Process
    ///
    /// 1. Validate the incoming transaction (before any lookup)
    /// 2. Load the current record by id
    /// 3. Merge the set fields of the incoming transaction onto it
    /// 4. Validate the merged record again so its sign matches its final operation type
    /// 5. Persist the merged record
    ///
    /// # Errors
    ///
    /// - `Validation`: incoming or merged transaction is invalid, or references
    ///   an account that does not exist
    /// - `TransactionNotFound`: no transaction has this id (nothing is written)
    /// - `Database`: lookup or update failed
    pub async fn update_transaction(&self, tx: Transaction) -> Result<Transaction, AppError> {
        let op_types = self.op_types.get_all().await;
        let id = tx.id;

        let changes = tx.validate(&op_types).map_err(|err| {
            tracing::warn!(error = %err, transaction_id = id, "error validating transaction to update");
            err
        })?;

        let mut current = self
            .repo
            .find_transactions(&TransactionFilter::by_id(id))
            .await
            .map_err(|err| {
                tracing::error!(error = %err, transaction_id = id, "error getting transaction to update");
                err
            })?
            .into_iter()
            .next()
            .ok_or_else(|| {
                tracing::warn!(transaction_id = id, "transaction not found");
                AppError::TransactionNotFound
            })?;

        current.merge(&changes);
        let merged = current.validate(&op_types).map_err(|err| {
            tracing::warn!(error = %err, transaction_id = id, "merged transaction is invalid");
            err
        })?;

        let updated = self
            .repo
            .update_transaction(&merged)
            .await
            .map_err(|err| match AppError::from_transaction_write(err) {
                AppError::Validation(err) => {
                    tracing::warn!(
                        error = %err,
                        transaction_id = id,
                        account_id = merged.account_id,
                        "transaction moved to unknown account"
                    );
                    AppError::Validation(err)
                }
                err => {
                    tracing::error!(error = %err, transaction_id = id, "error updating transaction");
                    err
                }
            })?;

        tracing::info!(transaction_id = id, "transaction updated");
        Ok(updated)
    }
}
