//! Touch template use case

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::ApplicationResult;
use crate::ports::TemplateRepository;

/// Records that a template was opened or sent.
pub struct TouchTemplate<R> {
    repository: R,
}

impl<R: TemplateRepository> TouchTemplate<R> {
    /// Creates a new `TouchTemplate` use case.
    pub const fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Sets the template's `lastOpenedAt` to `at`.
    ///
    /// # Errors
    /// Returns `NotFound` when the template does not exist for this user.
    pub async fn execute(
        &self,
        owner_id: &str,
        id: Uuid,
        at: DateTime<Utc>,
    ) -> ApplicationResult<()> {
        self.repository.touch(owner_id, id, at).await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ApplicationError;
    use crate::ports::Clock;
    use crate::test_support::{FixedClock, InMemoryTemplates, sample_template};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_touch_sets_last_opened() {
        let repo = Arc::new(InMemoryTemplates::default());
        let template = sample_template("alice");
        repo.insert(template.clone());
        let at = FixedClock::at(42).now();

        TouchTemplate::new(repo.clone())
            .execute("alice", template.id, at)
            .await
            .unwrap();

        let stored = repo.stored(template.id).unwrap();
        assert_eq!(stored.last_opened_at, Some(at));
        assert_eq!(stored.updated_at, template.updated_at);
    }

    #[tokio::test]
    async fn test_touch_other_users_template_fails() {
        let repo = InMemoryTemplates::default();
        let template = sample_template("alice");
        repo.insert(template.clone());

        let result = TouchTemplate::new(repo)
            .execute("bob", template.id, FixedClock::at(1).now())
            .await;
        assert!(matches!(result, Err(ApplicationError::NotFound(_))));
    }
}
