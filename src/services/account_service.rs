//! Account service - account lookup, creation and balance computation.
//!
//! Balances are not stored; they are derived by summing the ledger of
//! transactions recorded against the account.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::{
    error::AppError,
    models::{
        account::{Account, AccountFilter, CreateAccountRequest},
        transaction::TransactionFilter,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct AccountService {
    repo: Arc<dyn Repository>,
}

impl AccountService {
    pub fn new(repo: Arc<dyn Repository>) -> Self {
        Self { repo }
    }

    /// Get account by ID.
    ///
    /// Returns `Ok(None)` when no account matches; errors are reserved for
    /// persistence failures.
    pub async fn get_account_by_id(&self, id: i64) -> Result<Option<Account>, AppError> {
        let accounts = self
            .repo
            .find_accounts(&AccountFilter::by_id(id))
            .await
            .map_err(|err| {
                tracing::error!(error = %err, account_id = id, "error getting account");
                err
            })?;

        Ok(accounts.into_iter().next())
    }

    /// Create an account.
    ///
    /// # Errors
    ///
    /// - `MissingDocumentNumber`: document number is empty (nothing is written)
    /// - `Database`: the insert failed
    pub async fn create_account(&self, request: CreateAccountRequest) -> Result<Account, AppError> {
        if request.document_number.is_empty() {
            tracing::warn!("rejected account without document number");
            return Err(AppError::MissingDocumentNumber);
        }

        let account = self
            .repo
            .create_account(&request.document_number)
            .await
            .map_err(|err| {
                tracing::error!(error = %err, "error creating account");
                err
            })?;

        tracing::info!(account_id = account.id, "account created");
        Ok(account)
    }

    /// Sum of every transaction amount recorded for the account.
    ///
    /// An account without transactions has a balance of exactly zero.
    pub async fn get_account_balance(&self, id: i64) -> Result<Decimal, AppError> {
        let transactions = self
            .repo
            .find_transactions(&TransactionFilter::by_account(id))
            .await
            .map_err(|err| {
                tracing::error!(
                    error = %err,
                    account_id = id,
                    "error getting transactions to calculate balance"
                );
                err
            })?;

        Ok(transactions.iter().map(|tx| tx.amount).sum())
    }
}
