//! In-memory doubles for driving the router without a database.

#![allow(dead_code)]

use std::{
    borrow::Cow,
    error::Error as StdError,
    fmt,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header::CONTENT_TYPE},
};
use chrono::{DateTime, TimeZone, Utc};
use http_body_util::BodyExt;
use ledger_web_server::{
    AppState,
    clock::Clock,
    create_router,
    models::{
        account::{Account, AccountFilter},
        operation_type::{OperationType, OperationTypes},
        transaction::{Transaction, TransactionFilter},
    },
    repository::{Repository, TRANSACTION_ACCOUNT_FK},
    services::operation_type_registry::OperationTypeRegistry,
};
use serde_json::Value;
use sqlx::error::{DatabaseError, ErrorKind};
use tower::ServiceExt;

/// What Postgres reports when a transaction references a missing account.
#[derive(Debug)]
struct UnknownAccount;

impl fmt::Display for UnknownAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "insert or update on table \"transactions\" violates foreign key constraint \"{TRANSACTION_ACCOUNT_FK}\""
        )
    }
}

impl StdError for UnknownAccount {}

impl DatabaseError for UnknownAccount {
    fn message(&self) -> &str {
        "violates foreign key constraint"
    }

    fn code(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed("23503"))
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
        Some(TRANSACTION_ACCOUNT_FK)
    }

    fn kind(&self) -> ErrorKind {
        ErrorKind::ForeignKeyViolation
    }
}

#[derive(Default)]
struct Tables {
    operation_types: OperationTypes,
    accounts: Vec<Account>,
    transactions: Vec<Transaction>,
}

impl Tables {
    fn check_account(&self, account_id: i64) -> Result<(), sqlx::Error> {
        if self.accounts.iter().any(|acc| acc.id == account_id) {
            Ok(())
        } else {
            Err(sqlx::Error::Database(Box::new(UnknownAccount)))
        }
    }
}

/// Repository backed by vectors, with a switch to simulate an outage.
#[derive(Default)]
pub struct InMemoryRepository {
    tables: Mutex<Tables>,
    unavailable: AtomicBool,
}

impl InMemoryRepository {
    pub fn with_operation_types(op_types: OperationTypes) -> Self {
        Self {
            tables: Mutex::new(Tables {
                operation_types: op_types,
                ..Tables::default()
            }),
            unavailable: AtomicBool::new(false),
        }
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn transactions(&self) -> Vec<Transaction> {
        self.tables.lock().unwrap().transactions.clone()
    }

    pub fn accounts(&self) -> Vec<Account> {
        self.tables.lock().unwrap().accounts.clone()
    }

    fn check(&self) -> Result<(), sqlx::Error> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(sqlx::Error::PoolTimedOut)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn health(&self) -> Result<(), sqlx::Error> {
        self.check()
    }

    async fn create_operation_type(&self, op: &OperationType) -> Result<i64, sqlx::Error> {
        self.check()?;
        let mut tables = self.tables.lock().unwrap();
        let id = tables.operation_types.keys().max().copied().unwrap_or(0) + 1;
        tables.operation_types.insert(id, op.clone());
        Ok(id)
    }

    async fn find_operation_types(&self) -> Result<OperationTypes, sqlx::Error> {
        self.check()?;
        Ok(self.tables.lock().unwrap().operation_types.clone())
    }

    async fn create_account(&self, document_number: &str) -> Result<Account, sqlx::Error> {
        self.check()?;
        let mut tables = self.tables.lock().unwrap();
        let account = Account {
            id: tables.accounts.len() as i64 + 1,
            document_number: document_number.to_string(),
        };
        tables.accounts.push(account.clone());
        Ok(account)
    }

    async fn find_accounts(&self, filter: &AccountFilter) -> Result<Vec<Account>, sqlx::Error> {
        self.check()?;
        Ok(self
            .tables
            .lock()
            .unwrap()
            .accounts
            .iter()
            .filter(|acc| filter.id.is_none_or(|id| acc.id == id))
            .filter(|acc| {
                filter
                    .document_number
                    .as_ref()
                    .is_none_or(|doc| &acc.document_number == doc)
            })
            .cloned()
            .collect())
    }

    async fn create_transaction(&self, tx: &Transaction) -> Result<Transaction, sqlx::Error> {
        self.check()?;
        let mut tables = self.tables.lock().unwrap();
        tables.check_account(tx.account_id)?;
        let created = Transaction {
            id: tables.transactions.len() as i64 + 1,
            ..tx.clone()
        };
        tables.transactions.push(created.clone());
        Ok(created)
    }

    async fn find_transactions(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>, sqlx::Error> {
        self.check()?;
        Ok(self
            .tables
            .lock()
            .unwrap()
            .transactions
            .iter()
            .filter(|tx| filter.id.is_none_or(|id| tx.id == id))
            .filter(|tx| filter.account_id.is_none_or(|id| tx.account_id == id))
            .filter(|tx| {
                filter
                    .operation_type_id
                    .is_none_or(|id| tx.operation_type_id == id)
            })
            .filter(|tx| filter.amount.is_none_or(|amount| tx.amount == amount))
            .filter(|tx| filter.event_date.is_none_or(|date| tx.event_date == Some(date)))
            .cloned()
            .collect())
    }

    async fn update_transaction(&self, tx: &Transaction) -> Result<Transaction, sqlx::Error> {
        self.check()?;
        let mut tables = self.tables.lock().unwrap();
        tables.check_account(tx.account_id)?;
        let row = tables
            .transactions
            .iter_mut()
            .find(|row| row.id == tx.id)
            .ok_or(sqlx::Error::RowNotFound)?;
        *row = tx.clone();
        Ok(tx.clone())
    }
}

pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 5, 9, 34, 18).unwrap()
}

/// Purchases (1) are negative, payments (2) positive.
pub fn default_operation_types() -> OperationTypes {
    OperationTypes::from([
        (
            1,
            OperationType {
                description: "COMPRA A VISTA".to_string(),
                positive_amount_required: false,
            },
        ),
        (
            2,
            OperationType {
                description: "PAGAMENTO".to_string(),
                positive_amount_required: true,
            },
        ),
    ])
}

pub struct TestApp {
    pub router: Router,
    pub repo: Arc<InMemoryRepository>,
}

impl TestApp {
    pub async fn new() -> Self {
        let repo = Arc::new(InMemoryRepository::with_operation_types(
            default_operation_types(),
        ));
        let dyn_repo: Arc<dyn Repository> = repo.clone();
        let registry = OperationTypeRegistry::load(dyn_repo.clone()).await.unwrap();
        let state = AppState::new(dyn_repo, Arc::new(FixedClock(fixed_now())), registry);

        Self {
            router: create_router(state),
            repo,
        }
    }

    /// Send a request and decode the JSON body (`Value::Null` when empty).
    pub async fn send(&self, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, json)
    }

    pub async fn create_account(&self, document_number: &str) -> i64 {
        let (status, body) = self
            .send(
                "POST",
                "/accounts",
                Some(&format!(r#"{{"document_number":"{document_number}"}}"#)),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_i64().unwrap()
    }
}
