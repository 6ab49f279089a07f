//! Ledger service library.
//!
//! Records accounts, typed operations and signed transactions, and derives
//! account balances from the transaction ledger.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: PostgreSQL with sqlx behind the [`repository::Repository`] trait
//! - **Money**: `rust_decimal::Decimal`, never floats
//! - **Format**: JSON requests/responses

pub mod clock;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod services;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::trace::TraceLayer;

use crate::{
    clock::Clock,
    repository::Repository,
    services::{
        account_service::AccountService, health_service::HealthService,
        operation_type_registry::OperationTypeRegistry, transaction_service::TransactionService,
    },
};

/// Services shared with every handler through `State`.
#[derive(Clone)]
pub struct AppState {
    pub health: HealthService,
    pub accounts: AccountService,
    pub transactions: TransactionService,
    pub operation_types: OperationTypeRegistry,
}

impl AppState {
    /// Wire every service to the same repository, registry and clock.
    pub fn new(
        repo: Arc<dyn Repository>,
        clock: Arc<dyn Clock>,
        operation_types: OperationTypeRegistry,
    ) -> Self {
        Self {
            health: HealthService::new(repo.clone()),
            accounts: AccountService::new(repo.clone()),
            transactions: TransactionService::new(clock, repo, operation_types.clone()),
            operation_types,
        }
    }
}

/// Creates the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        // Account management routes
        .route("/accounts", post(handlers::accounts::create_account))
        .route("/accounts/{id}", get(handlers::accounts::get_account))
        .route(
            "/accounts/{id}/balance",
            get(handlers::accounts::get_account_balance),
        )
        // Transaction routes
        .route(
            "/transactions",
            post(handlers::transactions::create_transaction),
        )
        .route(
            "/transactions/{id}",
            put(handlers::transactions::update_transaction),
        )
        // Operation type routes
        .route(
            "/operation-types",
            get(handlers::operation_types::list_operation_types)
                .post(handlers::operation_types::create_operation_type),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
