//! Execute Request Use Case
//!
//! Validates a draft, assembles it against the active environment, sends it
//! once and returns the normalized response.

use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;
use workbench_domain::{Environment, RequestDraft, ResponseSnapshot};

use crate::ports::{Clock, HttpClient, HttpClientError, TemplateRepository};
use crate::request_builder::{AssembleError, assemble_request};
use crate::use_cases::template::TouchTemplate;

/// Result type for request execution.
pub type ExecuteResult = Result<ResponseSnapshot, ExecuteRequestError>;

/// Error type for the execute request use case.
#[derive(Debug, Clone, Error)]
pub enum ExecuteRequestError {
    /// URL is empty. Raised before any network activity.
    #[error("URL is required")]
    EmptyUrl,

    /// The request could not be assembled.
    #[error("{0}")]
    Assemble(#[from] AssembleError),

    /// The HTTP call failed.
    #[error("{0}")]
    Transport(#[from] HttpClientError),
}

/// Everything needed for one send.
#[derive(Debug, Clone)]
pub struct ExecuteInput {
    /// The user sending the request.
    pub owner_id: String,
    /// The request before substitution.
    pub draft: RequestDraft,
    /// The active environment, if any.
    pub environment: Option<Environment>,
    /// The saved template this send belongs to, if any.
    pub template_id: Option<Uuid>,
}

impl ExecuteInput {
    /// Creates an input with no environment and no template.
    #[must_use]
    pub fn new(owner_id: impl Into<String>, draft: RequestDraft) -> Self {
        Self {
            owner_id: owner_id.into(),
            draft,
            environment: None,
            template_id: None,
        }
    }

    /// Sets the active environment.
    #[must_use]
    pub fn with_environment(mut self, environment: Option<Environment>) -> Self {
        self.environment = environment;
        self
    }

    /// Associates the send with a saved template.
    #[must_use]
    pub const fn with_template(mut self, template_id: Option<Uuid>) -> Self {
        self.template_id = template_id;
        self
    }
}

/// Use case for executing HTTP requests.
///
/// # Example
///
/// ```ignore
/// let use_case = ExecuteRequest::new(client, templates, SystemClock::new());
/// let draft = RequestDraft::new(HttpMethod::Get, "https://api.example.com/users");
/// let response = use_case.execute(ExecuteInput::new("user-1", draft)).await?;
/// ```
pub struct ExecuteRequest<C, T, K> {
    client: C,
    templates: T,
    clock: K,
}

impl<C, T, K> ExecuteRequest<C, T, K>
where
    C: HttpClient,
    T: TemplateRepository + Clone + 'static,
    K: Clock,
{
    /// Creates a new `ExecuteRequest` use case.
    pub const fn new(client: C, templates: T, clock: K) -> Self {
        Self {
            client,
            templates,
            clock,
        }
    }

    /// Executes the request and returns the normalized response.
    ///
    /// When the send belongs to a saved template, its `lastOpenedAt` is
    /// updated on a spawned task; that update never affects the result.
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `EmptyUrl` without sending anything when the URL is blank,
    /// otherwise `Assemble` or `Transport` for any failure along the way.
    pub async fn execute(&self, input: ExecuteInput) -> ExecuteResult {
        input
            .draft
            .validate()
            .map_err(|_| ExecuteRequestError::EmptyUrl)?;

        let request = assemble_request(&input.draft, input.environment.as_ref())?;

        if let Some(template_id) = input.template_id {
            self.touch_in_background(input.owner_id.clone(), template_id);
        }

        debug!(
            method = %request.method,
            url = %request.url,
            headers = request.headers.len(),
            "dispatching request"
        );

        let response = self.client.execute(&request).await?;

        debug!(status = response.status, ok = response.ok, "received response");
        Ok(response)
    }

    fn touch_in_background(&self, owner_id: String, template_id: Uuid) {
        let touch = TouchTemplate::new(self.templates.clone());
        let at = self.clock.now();
        tokio::spawn(async move {
            if let Err(error) = touch.execute(&owner_id, template_id, at).await {
                warn!(%template_id, %error, "failed to update lastOpenedAt");
            }
        });
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::test_support::{
        FixedClock, InMemoryTemplates, MockHttpClient, sample_template, wait_until,
    };
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use workbench_domain::{HttpMethod, QueryParams, ResponseData};

    fn use_case(
        client: MockHttpClient,
    ) -> (
        ExecuteRequest<Arc<MockHttpClient>, Arc<InMemoryTemplates>, FixedClock>,
        Arc<MockHttpClient>,
        Arc<InMemoryTemplates>,
    ) {
        let client = Arc::new(client);
        let templates = Arc::new(InMemoryTemplates::default());
        let use_case = ExecuteRequest::new(client.clone(), templates.clone(), FixedClock::at(1_000));
        (use_case, client, templates)
    }

    #[tokio::test]
    async fn test_execute_success() {
        let (use_case, client, _) = use_case(MockHttpClient::ok(200, r#"{"id":1}"#));

        let env = Environment::new("user-1", "dev", FixedClock::at(0).now())
            .with_variable("path", "users")
            .with_variable("term", "bob");
        let draft = RequestDraft::new(HttpMethod::Get, "https://example.com/{{path}}")
            .with_query_params(QueryParams::from_pairs([("q", "{{term}}")]));

        let response = use_case
            .execute(ExecuteInput::new("user-1", draft).with_environment(Some(env)))
            .await
            .expect("should succeed");

        assert_eq!(response.status, 200);
        assert!(response.ok);
        assert_eq!(response.data, ResponseData::Json(serde_json::json!({"id": 1})));

        let sent = client.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].url, "https://example.com/users?q=bob");
    }

    #[tokio::test]
    async fn test_empty_url_sends_nothing() {
        let (use_case, client, _) = use_case(MockHttpClient::ok(200, ""));

        let result = use_case
            .execute(ExecuteInput::new(
                "user-1",
                RequestDraft::new(HttpMethod::Post, "  "),
            ))
            .await;

        assert!(matches!(result, Err(ExecuteRequestError::EmptyUrl)));
        assert!(client.sent().is_empty());
    }

    #[tokio::test]
    async fn test_transport_error_is_returned() {
        let (use_case, _, _) = use_case(MockHttpClient::failing(HttpClientError::Connection(
            "dns error: no such host".into(),
        )));

        let result = use_case
            .execute(ExecuteInput::new(
                "user-1",
                RequestDraft::new(HttpMethod::Get, "https://nowhere.invalid"),
            ))
            .await;

        let error = result.expect_err("should fail");
        assert!(matches!(error, ExecuteRequestError::Transport(_)));
        assert_eq!(error.to_string(), "Connection failed: dns error: no such host");
    }

    #[tokio::test]
    async fn test_template_is_touched() {
        let (use_case, _, templates) = use_case(MockHttpClient::ok(204, ""));
        let template = sample_template("user-1");
        templates.insert(template.clone());

        use_case
            .execute(
                ExecuteInput::new("user-1", template.request.clone())
                    .with_template(Some(template.id)),
            )
            .await
            .expect("should succeed");

        let touched = wait_until(|| {
            templates
                .stored(template.id)
                .and_then(|t| t.last_opened_at)
                .is_some()
        })
        .await;
        assert!(touched);
        assert_eq!(
            templates.stored(template.id).unwrap().last_opened_at,
            Some(FixedClock::at(1_000).now())
        );
    }

    #[tokio::test]
    async fn test_touch_failure_does_not_fail_request() {
        let (use_case, _, _) = use_case(MockHttpClient::ok(200, "done"));

        let response = use_case
            .execute(
                ExecuteInput::new(
                    "user-1",
                    RequestDraft::new(HttpMethod::Get, "https://example.com"),
                )
                .with_template(Some(Uuid::now_v7())),
            )
            .await
            .expect("touching a missing template must not fail the send");

        assert_eq!(response.data, ResponseData::Text("done".to_string()));
    }
}
