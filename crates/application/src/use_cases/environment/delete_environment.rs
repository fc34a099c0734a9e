//! Delete environment use case

use tracing::info;
use uuid::Uuid;

use crate::ApplicationResult;
use crate::ports::EnvironmentRepository;

/// Deletes an environment. Templates referencing it are left as they are.
pub struct DeleteEnvironment<R> {
    repository: R,
}

impl<R: EnvironmentRepository> DeleteEnvironment<R> {
    /// Creates a new `DeleteEnvironment` use case.
    pub const fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Executes the use case.
    ///
    /// # Errors
    /// Returns `ApplicationError::NotFound` if the owner has no such environment.
    pub async fn execute(&self, owner_id: &str, id: Uuid) -> ApplicationResult<()> {
        self.repository.delete(owner_id, id).await?;
        info!(%id, "environment deleted");
        Ok(())
    }
}
