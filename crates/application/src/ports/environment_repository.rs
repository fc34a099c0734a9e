//! Environment repository port
//!
//! Defines the interface for user-scoped environment persistence.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;
use workbench_domain::Environment;

use super::FileSystemError;

/// Errors that can occur during environment operations.
#[derive(Debug, thiserror::Error)]
pub enum EnvironmentError {
    /// Environment not found for this owner.
    #[error("Environment not found: {0}")]
    NotFound(Uuid),

    /// Underlying storage failure.
    #[error("Storage error: {0}")]
    Storage(#[from] FileSystemError),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Repository trait for environment persistence.
///
/// Every operation is scoped to an owner; an environment belonging to
/// someone else behaves exactly like a missing one.
#[async_trait]
pub trait EnvironmentRepository: Send + Sync {
    /// Lists the owner's environments in creation order.
    async fn list(&self, owner_id: &str) -> Result<Vec<Environment>, EnvironmentError>;

    /// Loads one environment.
    ///
    /// # Errors
    /// Returns `EnvironmentError::NotFound` if it does not exist for this owner.
    async fn get(&self, owner_id: &str, id: Uuid) -> Result<Environment, EnvironmentError>;

    /// Creates or replaces an environment.
    async fn save(&self, environment: &Environment) -> Result<(), EnvironmentError>;

    /// Deletes an environment.
    ///
    /// # Errors
    /// Returns `EnvironmentError::NotFound` if it does not exist for this owner.
    async fn delete(&self, owner_id: &str, id: Uuid) -> Result<(), EnvironmentError>;

    /// Loads an environment, mapping a missing one to `None`.
    async fn find(&self, owner_id: &str, id: Uuid) -> Result<Option<Environment>, EnvironmentError> {
        match self.get(owner_id, id).await {
            Ok(environment) => Ok(Some(environment)),
            Err(EnvironmentError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Clears the default flag on every environment of the owner except
    /// `keep`. Returns how many environments were rewritten.
    async fn clear_default_except(
        &self,
        owner_id: &str,
        keep: Option<Uuid>,
    ) -> Result<usize, EnvironmentError> {
        let mut cleared = 0;
        for mut environment in self.list(owner_id).await? {
            if environment.is_default && Some(environment.id) != keep {
                environment.is_default = false;
                self.save(&environment).await?;
                cleared += 1;
            }
        }
        Ok(cleared)
    }
}

#[async_trait]
impl<T: EnvironmentRepository + ?Sized> EnvironmentRepository for Arc<T> {
    async fn list(&self, owner_id: &str) -> Result<Vec<Environment>, EnvironmentError> {
        (**self).list(owner_id).await
    }

    async fn get(&self, owner_id: &str, id: Uuid) -> Result<Environment, EnvironmentError> {
        (**self).get(owner_id, id).await
    }

    async fn save(&self, environment: &Environment) -> Result<(), EnvironmentError> {
        (**self).save(environment).await
    }

    async fn delete(&self, owner_id: &str, id: Uuid) -> Result<(), EnvironmentError> {
        (**self).delete(owner_id, id).await
    }

    async fn clear_default_except(
        &self,
        owner_id: &str,
        keep: Option<Uuid>,
    ) -> Result<usize, EnvironmentError> {
        (**self).clear_default_except(owner_id, keep).await
    }
}
