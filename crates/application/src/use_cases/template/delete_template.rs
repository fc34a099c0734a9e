//! Delete template use case

use tracing::info;
use uuid::Uuid;

use crate::ApplicationResult;
use crate::ports::TemplateRepository;

/// Deletes a template owned by the user.
pub struct DeleteTemplate<R> {
    repository: R,
}

impl<R: TemplateRepository> DeleteTemplate<R> {
    /// Creates a new `DeleteTemplate` use case.
    pub const fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Executes the use case.
    ///
    /// # Errors
    /// Returns `NotFound` when the template does not exist for this user.
    pub async fn execute(&self, owner_id: &str, id: Uuid) -> ApplicationResult<()> {
        self.repository.delete(owner_id, id).await?;
        info!(%id, "deleted template");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ApplicationError;
    use crate::test_support::{InMemoryTemplates, sample_template};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_delete_removes_template() {
        let repo = Arc::new(InMemoryTemplates::default());
        let template = sample_template("alice");
        repo.insert(template.clone());

        let use_case = DeleteTemplate::new(repo.clone());
        assert!(matches!(
            use_case.execute("bob", template.id).await,
            Err(ApplicationError::NotFound(_))
        ));
        assert!(use_case.execute("alice", template.id).await.is_ok());
        assert!(repo.stored(template.id).is_none());
    }
}
