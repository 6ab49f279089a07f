//! Health check service.

use std::sync::Arc;

use crate::{error::AppError, repository::Repository};

#[derive(Clone)]
pub struct HealthService {
    repo: Arc<dyn Repository>,
}

impl HealthService {
    pub fn new(repo: Arc<dyn Repository>) -> Self {
        Self { repo }
    }

    /// Ping the store.
    ///
    /// An unreachable store is reported as `Unhealthy` rather than the raw
    /// database error, which only goes to the logs.
    pub async fn check(&self) -> Result<(), AppError> {
        self.repo.health().await.map_err(|err| {
            tracing::error!(error = %err, "error checking database health");
            AppError::Unhealthy
        })
    }
}
