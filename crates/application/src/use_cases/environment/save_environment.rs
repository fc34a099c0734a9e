//! Save environment use case
//!
//! Creates or updates an environment and keeps at most one default per
//! owner. The record is written first and only then is the flag cleared on
//! the others, so a failed write never leaves the owner without a default.

use tracing::debug;
use uuid::Uuid;
use workbench_domain::Environment;
use workbench_domain::environment::VariableMap;

use crate::ApplicationResult;
use crate::ports::{Clock, EnvironmentRepository};

/// Input for creating (`id: None`) or updating an environment.
#[derive(Debug, Clone, Default)]
pub struct SaveEnvironmentInput {
    /// The owning user.
    pub owner_id: String,
    /// Existing environment to update, or `None` to create.
    pub id: Option<Uuid>,
    /// Environment name.
    pub name: String,
    /// Full variable set; replaces the stored one.
    pub variables: VariableMap,
    /// Whether this becomes the owner's default.
    pub is_default: bool,
}

/// Saves an environment.
pub struct SaveEnvironment<R, K> {
    repository: R,
    clock: K,
}

impl<R: EnvironmentRepository, K: Clock> SaveEnvironment<R, K> {
    /// Creates a new `SaveEnvironment` use case.
    pub const fn new(repository: R, clock: K) -> Self {
        Self { repository, clock }
    }

    /// Executes the use case and returns the stored environment.
    ///
    /// # Errors
    /// Returns `Validation` for a blank name or a variable name that no
    /// token could reference, `NotFound` when updating a missing
    /// environment, or `Storage` if a write fails.
    pub async fn execute(&self, input: SaveEnvironmentInput) -> ApplicationResult<Environment> {
        let now = self.clock.now();

        let mut environment = match input.id {
            Some(id) => self.repository.get(&input.owner_id, id).await?,
            None => Environment::new(input.owner_id.clone(), "", now),
        };
        environment.name = input.name.trim().to_string();
        environment.variables = input.variables;
        environment.is_default = input.is_default;
        environment.updated_at = now;
        environment.validate()?;

        self.repository.save(&environment).await?;

        if environment.is_default {
            let cleared = self
                .repository
                .clear_default_except(&environment.owner_id, Some(environment.id))
                .await?;
            debug!(cleared, id = %environment.id, "cleared previous default environments");
        }

        Ok(environment)
    }
}
