//! Persistence boundary.
//!
//! Services talk to storage only through the [`Repository`] trait. Lookups
//! take filter objects whose `None` fields are unconstrained, which the
//! Postgres implementation expresses as `column = COALESCE($n, column)`.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::Connection;

use crate::{
    db::DbPool,
    models::{
        account::{Account, AccountFilter},
        operation_type::{OperationType, OperationTypeRecord, OperationTypes},
        transaction::{Transaction, TransactionFilter},
    },
};

/// Foreign key from `transactions.account_id` to `accounts.id`.
///
/// Implementations report a transaction write against an unknown account as
/// a foreign key violation on this constraint.
pub const TRANSACTION_ACCOUNT_FK: &str = "transactions_account_id_fkey";

/// Storage contract consumed by the services.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Repository: Send + Sync {
    /// Verify the store is reachable.
    async fn health(&self) -> Result<(), sqlx::Error>;

    async fn create_operation_type(&self, op: &OperationType) -> Result<i64, sqlx::Error>;

    /// Read every operation type.
    async fn find_operation_types(&self) -> Result<OperationTypes, sqlx::Error>;

    async fn create_account(&self, document_number: &str) -> Result<Account, sqlx::Error>;

    async fn find_accounts(&self, filter: &AccountFilter) -> Result<Vec<Account>, sqlx::Error>;

    async fn create_transaction(&self, tx: &Transaction) -> Result<Transaction, sqlx::Error>;

    async fn find_transactions(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>, sqlx::Error>;

    /// Overwrite every column of the transaction identified by `tx.id`.
    async fn update_transaction(&self, tx: &Transaction) -> Result<Transaction, sqlx::Error>;
}

/// PostgreSQL-backed repository.
#[derive(Debug, Clone)]
pub struct PgRepository {
    pool: DbPool,
    health_check_timeout: Duration,
}

impl PgRepository {
    pub fn new(pool: DbPool, health_check_timeout: Duration) -> Self {
        Self {
            pool,
            health_check_timeout,
        }
    }
}

#[async_trait]
impl Repository for PgRepository {
    async fn health(&self) -> Result<(), sqlx::Error> {
        let ping = async {
            let mut conn = self.pool.acquire().await?;
            conn.ping().await
        };

        // A hung database must not hang the health endpoint
        tokio::time::timeout(self.health_check_timeout, ping)
            .await
            .map_err(|_| sqlx::Error::PoolTimedOut)?
    }

    async fn create_operation_type(&self, op: &OperationType) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            r#"
            INSERT INTO operation_types (description, positive_amount)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(&op.description)
        .bind(op.positive_amount_required)
        .fetch_one(&self.pool)
        .await
    }

    async fn find_operation_types(&self) -> Result<OperationTypes, sqlx::Error> {
        let records = sqlx::query_as::<_, OperationTypeRecord>(
            "SELECT id, description, positive_amount FROM operation_types",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records
            .into_iter()
            .map(OperationTypeRecord::into_entry)
            .collect())
    }

    async fn create_account(&self, document_number: &str) -> Result<Account, sqlx::Error> {
        sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (document_number)
            VALUES ($1)
            RETURNING id, document_number
            "#,
        )
        .bind(document_number)
        .fetch_one(&self.pool)
        .await
    }

    async fn find_accounts(&self, filter: &AccountFilter) -> Result<Vec<Account>, sqlx::Error> {
        sqlx::query_as::<_, Account>(
            r#"
            SELECT id, document_number
            FROM accounts
            WHERE id = COALESCE($1, id)
              AND document_number = COALESCE($2, document_number)
            ORDER BY id
            "#,
        )
        .bind(filter.id)
        .bind(filter.document_number.as_deref())
        .fetch_all(&self.pool)
        .await
    }

    async fn create_transaction(&self, tx: &Transaction) -> Result<Transaction, sqlx::Error> {
        sqlx::query_as::<_, Transaction>(
            r#"
            INSERT INTO transactions (account_id, operation_type_id, amount, event_date)
            VALUES ($1, $2, $3, $4)
            RETURNING id, account_id, operation_type_id, amount, event_date
            "#,
        )
        .bind(tx.account_id)
        .bind(tx.operation_type_id)
        .bind(tx.amount)
        .bind(tx.event_date)
        .fetch_one(&self.pool)
        .await
    }

    async fn find_transactions(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>, sqlx::Error> {
        sqlx::query_as::<_, Transaction>(
            r#"
            SELECT id, account_id, operation_type_id, amount, event_date
            FROM transactions
            WHERE id = COALESCE($1, id)
              AND account_id = COALESCE($2, account_id)
              AND operation_type_id = COALESCE($3, operation_type_id)
              AND amount = COALESCE($4, amount)
              AND event_date = COALESCE($5, event_date)
            ORDER BY id
            "#,
        )
        .bind(filter.id)
        .bind(filter.account_id)
        .bind(filter.operation_type_id)
        .bind(filter.amount)
        .bind(filter.event_date)
        .fetch_all(&self.pool)
        .await
    }

    async fn update_transaction(&self, tx: &Transaction) -> Result<Transaction, sqlx::Error> {
        sqlx::query_as::<_, Transaction>(
            r#"
            UPDATE transactions
            SET account_id = $2,
                operation_type_id = $3,
                amount = $4,
                event_date = $5
            WHERE id = $1
            RETURNING id, account_id, operation_type_id, amount, event_date
            "#,
        )
        .bind(tx.id)
        .bind(tx.account_id)
        .bind(tx.operation_type_id)
        .bind(tx.amount)
        .bind(tx.event_date)
        .fetch_one(&self.pool)
        .await
    }
}
