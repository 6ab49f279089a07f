//! Operation type registry.
//!
//! Holds the operation types loaded from the repository at startup as a
//! single immutable snapshot. Readers clone the `Arc` and keep a consistent
//! view for the whole request; `refresh` builds a complete new map before
//! swapping it in, so a failed or in-flight refresh is never observed.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    error::AppError,
    models::operation_type::{OperationType, OperationTypes},
    repository::Repository,
};

#[derive(Clone)]
pub struct OperationTypeRegistry {
    repo: Arc<dyn Repository>,
    snapshot: Arc<RwLock<Arc<OperationTypes>>>,
}

impl OperationTypeRegistry {
    /// Build a registry around an already loaded set of operation types.
    pub fn new(repo: Arc<dyn Repository>, op_types: OperationTypes) -> Self {
        Self {
            repo,
            snapshot: Arc::new(RwLock::new(Arc::new(op_types))),
        }
    }

    /// Read every operation type from the repository and build a registry.
    pub async fn load(repo: Arc<dyn Repository>) -> Result<Self, AppError> {
        let op_types = repo.find_operation_types().await?;
        tracing::info!(count = op_types.len(), "operation types loaded");
        Ok(Self::new(repo, op_types))
    }

    /// Current mapping of id to operation type.
    pub async fn get_all(&self) -> Arc<OperationTypes> {
        self.snapshot.read().await.clone()
    }

    /// Persist a new operation type and refresh the snapshot so it can be
    /// used right away.
    pub async fn create(&self, op: OperationType) -> Result<(), AppError> {
        if op.description.trim().is_empty() {
            return Err(AppError::InvalidRequest(
                "missing operation type description".to_string(),
            ));
        }

        let id = self.repo.create_operation_type(&op).await.map_err(|err| {
            tracing::error!(error = %err, description = %op.description, "error creating operation type");
            err
        })?;
        tracing::info!(operation_type_id = id, "operation type created");

        self.refresh().await
    }

    /// Re-read all operation types and replace the snapshot.
    ///
    /// On failure the previous snapshot stays in place.
    pub async fn refresh(&self) -> Result<(), AppError> {
        let op_types = self.repo.find_operation_types().await.map_err(|err| {
            tracing::error!(error = %err, "error refreshing operation types");
            err
        })?;

        *self.snapshot.write().await = Arc::new(op_types);
        Ok(())
    }
}
