//! Template repository port

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;
use workbench_domain::RequestTemplate;

use super::FileSystemError;

/// Errors that can occur during template operations.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// Template not found for this owner.
    #[error("Template not found: {0}")]
    NotFound(Uuid),

    /// Underlying storage failure.
    #[error("Storage error: {0}")]
    Storage(#[from] FileSystemError),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Repository trait for request template persistence, scoped by owner.
#[async_trait]
pub trait TemplateRepository: Send + Sync {
    /// Lists the owner's templates in storage order.
    async fn list(&self, owner_id: &str) -> Result<Vec<RequestTemplate>, TemplateError>;

    /// Loads one template.
    ///
    /// # Errors
    /// Returns `TemplateError::NotFound` if it does not exist for this owner.
    async fn get(&self, owner_id: &str, id: Uuid) -> Result<RequestTemplate, TemplateError>;

    /// Creates or replaces a template.
    async fn save(&self, template: &RequestTemplate) -> Result<(), TemplateError>;

    /// Deletes a template.
    ///
    /// # Errors
    /// Returns `TemplateError::NotFound` if it does not exist for this owner.
    async fn delete(&self, owner_id: &str, id: Uuid) -> Result<(), TemplateError>;

    /// Sets `lastOpenedAt` on a template.
    async fn touch(&self, owner_id: &str, id: Uuid, at: DateTime<Utc>) -> Result<(), TemplateError> {
        let mut template = self.get(owner_id, id).await?;
        template.touch(at);
        self.save(&template).await
    }
}

#[async_trait]
impl<T: TemplateRepository + ?Sized> TemplateRepository for Arc<T> {
    async fn list(&self, owner_id: &str) -> Result<Vec<RequestTemplate>, TemplateError> {
        (**self).list(owner_id).await
    }

    async fn get(&self, owner_id: &str, id: Uuid) -> Result<RequestTemplate, TemplateError> {
        (**self).get(owner_id, id).await
    }

    async fn save(&self, template: &RequestTemplate) -> Result<(), TemplateError> {
        (**self).save(template).await
    }

    async fn delete(&self, owner_id: &str, id: Uuid) -> Result<(), TemplateError> {
        (**self).delete(owner_id, id).await
    }

    async fn touch(&self, owner_id: &str, id: Uuid, at: DateTime<Utc>) -> Result<(), TemplateError> {
        (**self).touch(owner_id, id, at).await
    }
}
