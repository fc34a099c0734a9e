//! Select environment use case
//!
//! Picks the environment a send runs against.

use uuid::Uuid;
use workbench_domain::{Environment, select_active};

use crate::ApplicationResult;
use crate::ports::EnvironmentRepository;

/// Resolves which environment to use for a send.
pub struct SelectEnvironment<R> {
    repository: R,
}

impl<R: EnvironmentRepository> SelectEnvironment<R> {
    /// Creates a new `SelectEnvironment` use case.
    pub const fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Returns the first candidate id that exists for the owner, else the
    /// owner's default, else their first environment, else `None`.
    ///
    /// # Errors
    /// Returns `Storage` if the environments cannot be listed.
    pub async fn execute(
        &self,
        owner_id: &str,
        candidates: &[Option<Uuid>],
    ) -> ApplicationResult<Option<Environment>> {
        let mut environments = self.repository.list(owner_id).await?;

        let chosen = candidates
            .iter()
            .flatten()
            .find_map(|id| environments.iter().position(|e| e.id == *id))
            .or_else(|| {
                select_active(&environments)
                    .and_then(|active| environments.iter().position(|e| e.id == active.id))
            });

        Ok(chosen.map(|index| environments.swap_remove(index)))
    }
}
