//! File-based environment repository implementation.

use std::path::PathBuf;

use async_trait::async_trait;
use uuid::Uuid;
use workbench_application::ports::{EnvironmentError, EnvironmentRepository, FileSystem};
use workbench_domain::Environment;

use super::record_store::{RecordStore, StoreError};

impl From<StoreError> for EnvironmentError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound(id) => Self::NotFound(id),
            StoreError::FileSystem(e) => Self::Storage(e),
            StoreError::Serialization(e) => Self::Serialization(e.to_string()),
        }
    }
}

/// File-based environment repository.
///
/// Each environment is one `<id>.json` file in the owner's
/// `environments/` directory.
#[derive(Debug, Clone)]
pub struct FileEnvironmentRepository<F> {
    store: RecordStore<F, Environment>,
}

impl<F: FileSystem> FileEnvironmentRepository<F> {
    /// Creates a repository rooted at `data_dir`.
    pub fn new(fs: F, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            store: RecordStore::new(fs, data_dir, "environments"),
        }
    }
}

#[async_trait]
impl<F: FileSystem> EnvironmentRepository for FileEnvironmentRepository<F> {
    async fn list(&self, owner_id: &str) -> Result<Vec<Environment>, EnvironmentError> {
        let mut environments = self.store.list(owner_id).await?;
        environments.retain(|e| e.is_owned_by(owner_id));
        Ok(environments)
    }

    async fn get(&self, owner_id: &str, id: Uuid) -> Result<Environment, EnvironmentError> {
        let environment = self.store.get(owner_id, id).await?;
        if !environment.is_owned_by(owner_id) {
            return Err(EnvironmentError::NotFound(id));
        }
        Ok(environment)
    }

    async fn save(&self, environment: &Environment) -> Result<(), EnvironmentError> {
        self.store
            .put(&environment.owner_id, environment.id, environment)
            .await?;
        Ok(())
    }

    async fn delete(&self, owner_id: &str, id: Uuid) -> Result<(), EnvironmentError> {
        self.store.remove(owner_id, id).await?;
        Ok(())
    }
}
