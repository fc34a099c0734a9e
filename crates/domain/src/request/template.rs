//! Request templates ("API configs")

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Headers, HttpMethod, QueryParams};
use crate::error::{DomainError, DomainResult};
use crate::id::generate_id;

/// The editable part of a request: everything needed to build a call
/// before variable substitution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestDraft {
    /// HTTP method
    #[serde(default)]
    pub method: HttpMethod,
    /// Target URL, may contain `{{var}}` tokens
    #[serde(default)]
    pub url: String,
    /// Header rows
    #[serde(default)]
    pub headers: Headers,
    /// Query parameter rows
    #[serde(default)]
    pub query_params: QueryParams,
    /// Raw body text, may contain `{{var}}` tokens
    #[serde(default)]
    pub body: String,
}

impl RequestDraft {
    /// Creates a draft with the given method and URL.
    #[must_use]
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            ..Self::default()
        }
    }

    /// Sets the header rows.
    #[must_use]
    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    /// Sets the query parameter rows.
    #[must_use]
    pub fn with_query_params(mut self, query_params: QueryParams) -> Self {
        self.query_params = query_params;
        self
    }

    /// Sets the body text.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Checks that the draft can be saved or sent.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MissingUrl` if the URL is blank.
    pub fn validate(&self) -> DomainResult<()> {
        if self.url.trim().is_empty() {
            return Err(DomainError::MissingUrl);
        }
        Ok(())
    }
}

/// A saved, reusable request owned by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestTemplate {
    /// Unique identifier
    pub id: Uuid,
    /// Owning user
    pub owner_id: String,
    /// Display name
    pub name: String,
    /// The request itself
    #[serde(flatten)]
    pub request: RequestDraft,
    /// Environment selected for this template, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment_id: Option<Uuid>,
    /// When the template was last sent or opened
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_opened_at: Option<DateTime<Utc>>,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

impl RequestTemplate {
    /// Creates a new template for `owner_id`.
    #[must_use]
    pub fn new(
        owner_id: impl Into<String>,
        name: impl Into<String>,
        request: RequestDraft,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: generate_id(),
            owner_id: owner_id.into(),
            name: name.into(),
            request,
            environment_id: None,
            last_opened_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the environment used when this template is sent.
    #[must_use]
    pub const fn with_environment(mut self, environment_id: Uuid) -> Self {
        self.environment_id = Some(environment_id);
        self
    }

    /// Records that the template was opened at `now`.
    pub const fn touch(&mut self, now: DateTime<Utc>) {
        self.last_opened_at = Some(now);
    }

    /// Returns true if `owner_id` owns this template.
    #[must_use]
    pub fn is_owned_by(&self, owner_id: &str) -> bool {
        self.owner_id == owner_id
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_validate_requires_url() {
        assert_eq!(
            RequestDraft::new(HttpMethod::Get, "   ").validate(),
            Err(DomainError::MissingUrl)
        );
        assert!(
            RequestDraft::new(HttpMethod::Get, "https://example.com")
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn test_template_serializes_flat_camel_case() {
        let now = Utc::now();
        let template = RequestTemplate::new(
            "user-1",
            "List users",
            RequestDraft::new(HttpMethod::Get, "{{base}}/users"),
            now,
        );

        let json = serde_json::to_value(&template).unwrap();
        assert_eq!(json["ownerId"], "user-1");
        assert_eq!(json["method"], "GET");
        assert_eq!(json["url"], "{{base}}/users");
        assert!(json.get("queryParams").is_some());
        assert!(json.get("lastOpenedAt").is_none());

        let restored: RequestTemplate = serde_json::from_value(json).unwrap();
        assert_eq!(restored, template);
    }

    #[test]
    fn test_touch_sets_last_opened() {
        let now = Utc::now();
        let mut template =
            RequestTemplate::new("u", "t", RequestDraft::new(HttpMethod::Get, "x"), now);
        template.touch(now);
        assert_eq!(template.last_opened_at, Some(now));
    }
}
