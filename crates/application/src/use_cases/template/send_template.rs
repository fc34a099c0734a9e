//! Send template use case
//!
//! Loads a saved template, picks the environment to run it against and
//! executes it once.

use uuid::Uuid;
use workbench_domain::ResponseSnapshot;

use crate::ApplicationResult;
use crate::execute_request::{ExecuteInput, ExecuteRequest};
use crate::ports::{Clock, EnvironmentRepository, HttpClient, TemplateRepository};
use crate::use_cases::environment::SelectEnvironment;

/// Input for sending a saved template.
#[derive(Debug, Clone)]
pub struct SendTemplateInput {
    /// The user sending the template.
    pub owner_id: String,
    /// Template to send.
    pub template_id: Uuid,
    /// Environment chosen for this send, overriding the template's own.
    pub environment_id: Option<Uuid>,
}

/// Sends a saved template.
pub struct SendTemplate<C, T, E, K> {
    templates: T,
    environments: SelectEnvironment<E>,
    executor: ExecuteRequest<C, T, K>,
}

impl<C, T, E, K> SendTemplate<C, T, E, K>
where
    C: HttpClient,
    T: TemplateRepository + Clone + 'static,
    E: EnvironmentRepository,
    K: Clock,
{
    /// Creates a new `SendTemplate` use case.
    pub fn new(client: C, templates: T, environments: E, clock: K) -> Self {
        Self {
            executor: ExecuteRequest::new(client, templates.clone(), clock),
            environments: SelectEnvironment::new(environments),
            templates,
        }
    }

    /// Executes the use case.
    ///
    /// The environment is the explicit one, else the template's, else the
    /// user's default, else their first; ids that no longer resolve are
    /// skipped.
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown template, `Validation` when its URL
    /// is blank, or `Transport` when the call fails.
    pub async fn execute(&self, input: SendTemplateInput) -> ApplicationResult<ResponseSnapshot> {
        let template = self
            .templates
            .get(&input.owner_id, input.template_id)
            .await?;

        let environment = self
            .environments
            .execute(
                &input.owner_id,
                &[input.environment_id, template.environment_id],
            )
            .await?;

        let execute = ExecuteInput::new(input.owner_id, template.request)
            .with_environment(environment)
            .with_template(Some(template.id));

        Ok(self.executor.execute(execute).await?)
    }
}
