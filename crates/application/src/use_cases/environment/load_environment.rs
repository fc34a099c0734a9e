//! Get environment use case

use uuid::Uuid;
use workbench_domain::Environment;

use crate::ApplicationResult;
use crate::ports::EnvironmentRepository;

/// Loads a single environment of a user.
pub struct GetEnvironment<R> {
    repository: R,
}

impl<R: EnvironmentRepository> GetEnvironment<R> {
    /// Creates a new `GetEnvironment` use case.
    pub const fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Executes the use case.
    ///
    /// # Errors
    /// Returns `ApplicationError::NotFound` if the owner has no such environment.
    pub async fn execute(&self, owner_id: &str, id: Uuid) -> ApplicationResult<Environment> {
        Ok(self.repository.get(owner_id, id).await?)
    }
}
