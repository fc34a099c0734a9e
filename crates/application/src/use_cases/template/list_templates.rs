//! List templates use case

use std::cmp::Ordering;

use workbench_domain::RequestTemplate;

use crate::ApplicationResult;
use crate::ports::TemplateRepository;

/// Lists a user's templates, most recently opened first.
pub struct ListTemplates<R> {
    repository: R,
}

impl<R: TemplateRepository> ListTemplates<R> {
    /// Creates a new `ListTemplates` use case.
    pub const fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Executes the use case.
    ///
    /// Templates never opened come after every opened one; ties are broken
    /// by name.
    #[allow(clippy::missing_errors_doc)]
    pub async fn execute(&self, owner_id: &str) -> ApplicationResult<Vec<RequestTemplate>> {
        let mut templates = self.repository.list(owner_id).await?;
        templates.sort_by(recently_opened_first);
        Ok(templates)
    }
}

fn recently_opened_first(a: &RequestTemplate, b: &RequestTemplate) -> Ordering {
    match (a.last_opened_at, b.last_opened_at) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| a.name.cmp(&b.name))
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use crate::ports::Clock;
    use crate::test_support::{FixedClock, InMemoryTemplates, sample_template};
    use pretty_assertions::assert_eq;

    fn named(name: &str, opened_at: Option<i64>) -> RequestTemplate {
        let mut template = sample_template("alice");
        template.name = name.to_string();
        template.last_opened_at = opened_at.map(|s| FixedClock::at(s).now());
        template
    }

    #[tokio::test]
    async fn test_most_recently_opened_first() {
        let repo = InMemoryTemplates::default();
        repo.insert(named("never b", None));
        repo.insert(named("old", Some(10)));
        repo.insert(named("never a", None));
        repo.insert(named("new", Some(20)));

        let mut foreign = sample_template("bob");
        foreign.last_opened_at = Some(FixedClock::at(99).now());
        repo.insert(foreign);

        let names: Vec<_> = ListTemplates::new(repo)
            .execute("alice")
            .await
            .expect("should list")
            .into_iter()
            .map(|t| t.name)
            .collect();

        assert_eq!(names, vec!["new", "old", "never a", "never b"]);
    }
}
