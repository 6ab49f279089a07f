//! Ledger Service - Main Application Entry Point
//!
//! REST API server for accounts and signed transactions.
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Create database connection pool
//! 3. Run database migrations
//! 4. Load operation types into the registry
//! 5. Build HTTP router and start server on configured port
//! 6. On SIGINT/SIGTERM, stop accepting connections and drain in-flight requests

use std::{sync::Arc, time::Duration};

use ledger_web_server::{
    AppState,
    clock::SystemClock,
    config::Config,
    create_router, db,
    repository::{PgRepository, Repository},
    services::operation_type_registry::OperationTypeRegistry,
};
use tokio::signal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with tracing subscriber. Reads RUST_LOG environment variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    let db_config = config.database();
    let pool = db::create_pool(&db_config).await?;
    tracing::info!(
        max_connections = db_config.max_connections,
        "Database pool created"
    );

    db::run_migrations(&pool).await?;
    tracing::info!("Database migrations complete");

    let repo: Arc<dyn Repository> =
        Arc::new(PgRepository::new(pool.clone(), db_config.health_check_timeout));

    // The service cannot validate transactions without operation types
    let operation_types = OperationTypeRegistry::load(repo.clone()).await?;

    let state = AppState::new(repo, Arc::new(SystemClock), operation_types);
    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(config.shutdown_timeout()))
        .await?;

    pool.close().await;
    tracing::info!("Server stopped");

    Ok(())
}

/// Resolves on SIGINT or SIGTERM.
///
/// Once triggered, a watchdog exits the process if draining takes longer
/// than `timeout`.
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
    tokio::spawn(async move {
        tokio::time::sleep(timeout).await;
        tracing::error!("graceful shutdown timed out, forcing exit");
        std::process::exit(1);
    });
}
