//! Get template use case

use uuid::Uuid;
use workbench_domain::RequestTemplate;

use crate::ApplicationResult;
use crate::ports::TemplateRepository;

/// Loads a single template owned by the user.
pub struct GetTemplate<R> {
    repository: R,
}

impl<R: TemplateRepository> GetTemplate<R> {
    /// Creates a new `GetTemplate` use case.
    pub const fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Executes the use case.
    ///
    /// # Errors
    /// Returns `NotFound` when the template does not exist for this user.
    pub async fn execute(&self, owner_id: &str, id: Uuid) -> ApplicationResult<RequestTemplate> {
        Ok(self.repository.get(owner_id, id).await?)
    }
}
