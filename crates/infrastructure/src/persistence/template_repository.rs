//! File-based request template repository.

use std::path::PathBuf;

use async_trait::async_trait;
use uuid::Uuid;
use workbench_application::ports::{FileSystem, TemplateError, TemplateRepository};
use workbench_domain::RequestTemplate;

use super::record_store::{RecordStore, StoreError};

impl From<StoreError> for TemplateError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound(id) => Self::NotFound(id),
            StoreError::FileSystem(e) => Self::Storage(e),
            StoreError::Serialization(e) => Self::Serialization(e.to_string()),
        }
    }
}

/// File-based template repository, one `<id>.json` per template under the
/// owner's `templates/` directory.
#[derive(Debug, Clone)]
pub struct FileTemplateRepository<F> {
    store: RecordStore<F, RequestTemplate>,
}

impl<F: FileSystem> FileTemplateRepository<F> {
    /// Creates a repository rooted at `data_dir`.
    pub fn new(fs: F, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            store: RecordStore::new(fs, data_dir, "templates"),
        }
    }
}

#[async_trait]
impl<F: FileSystem> TemplateRepository for FileTemplateRepository<F> {
    async fn list(&self, owner_id: &str) -> Result<Vec<RequestTemplate>, TemplateError> {
        let mut templates = self.store.list(owner_id).await?;
        templates.retain(|t| t.is_owned_by(owner_id));
        Ok(templates)
    }

    async fn get(&self, owner_id: &str, id: Uuid) -> Result<RequestTemplate, TemplateError> {
        let template = self.store.get(owner_id, id).await?;
        if !template.is_owned_by(owner_id) {
            return Err(TemplateError::NotFound(id));
        }
        Ok(template)
    }

    async fn save(&self, template: &RequestTemplate) -> Result<(), TemplateError> {
        self.store
            .put(&template.owner_id, template.id, template)
            .await?;
        Ok(())
    }

    async fn delete(&self, owner_id: &str, id: Uuid) -> Result<(), TemplateError> {
        self.store.remove(owner_id, id).await?;
        Ok(())
    }
}
