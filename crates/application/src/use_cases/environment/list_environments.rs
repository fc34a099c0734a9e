//! List environments use case

use uuid::Uuid;
use workbench_domain::{Environment, select_active};

use crate::ApplicationResult;
use crate::ports::EnvironmentRepository;

/// Output containing the owner's environments and the one to start with.
#[derive(Debug, Clone)]
pub struct ListEnvironmentsOutput {
    /// Environments in creation order.
    pub environments: Vec<Environment>,
    /// The default, else the first, else none.
    pub active_id: Option<Uuid>,
}

/// Lists all environments of a user.
pub struct ListEnvironments<R> {
    repository: R,
}

impl<R: EnvironmentRepository> ListEnvironments<R> {
    /// Creates a new `ListEnvironments` use case.
    pub const fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Executes the use case.
    #[allow(clippy::missing_errors_doc)]
    pub async fn execute(&self, owner_id: &str) -> ApplicationResult<ListEnvironmentsOutput> {
        let environments = self.repository.list(owner_id).await?;
        let active_id = select_active(&environments).map(|e| e.id);
        Ok(ListEnvironmentsOutput {
            environments,
            active_id,
        })
    }
}
