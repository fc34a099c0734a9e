//! Save template use case

use uuid::Uuid;
use workbench_domain::{DomainError, RequestDraft, RequestTemplate};

use crate::ApplicationResult;
use crate::ports::{Clock, TemplateRepository};

/// Input for creating (`id: None`) or updating a template.
#[derive(Debug, Clone)]
pub struct SaveTemplateInput {
    /// The owning user.
    pub owner_id: String,
    /// Existing template to update, or `None` to create.
    pub id: Option<Uuid>,
    /// Display name.
    pub name: String,
    /// The request as edited.
    pub request: RequestDraft,
    /// Environment to send this template with.
    pub environment_id: Option<Uuid>,
}

/// Creates or updates a template.
pub struct SaveTemplate<R, K> {
    repository: R,
    clock: K,
}

impl<R: TemplateRepository, K: Clock> SaveTemplate<R, K> {
    /// Creates a new `SaveTemplate` use case.
    pub const fn new(repository: R, clock: K) -> Self {
        Self { repository, clock }
    }

    /// Executes the use case and returns the stored template.
    ///
    /// `lastOpenedAt` and `createdAt` of an existing template are kept.
    ///
    /// # Errors
    /// Returns `Validation` for a missing URL or name before anything is
    /// written, `NotFound` when updating a missing template, or `Storage`.
    pub async fn execute(&self, input: SaveTemplateInput) -> ApplicationResult<RequestTemplate> {
        input.request.validate()?;
        let name = input.name.trim();
        if name.is_empty() {
            return Err(DomainError::MissingName.into());
        }

        let now = self.clock.now();
        let template = match input.id {
            Some(id) => {
                let mut existing = self.repository.get(&input.owner_id, id).await?;
                existing.name = name.to_string();
                existing.request = input.request;
                existing.environment_id = input.environment_id;
                existing.updated_at = now;
                existing
            }
            None => {
                let mut created = RequestTemplate::new(input.owner_id, name, input.request, now);
                created.environment_id = input.environment_id;
                created
            }
        };

        self.repository.save(&template).await?;
        Ok(template)
    }
}
