//! Fully substituted requests ready to be sent

use serde::{Deserialize, Serialize};

use super::HttpMethod;

/// The body of a resolved request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "content", rename_all = "camelCase")]
pub enum ResolvedBody {
    /// The payload parsed as JSON; sent re-serialized with a JSON content type.
    Json(serde_json::Value),
    /// The payload as typed, sent verbatim.
    Raw(String),
}

impl ResolvedBody {
    /// Returns the bytes that go on the wire.
    #[must_use]
    pub fn to_wire_string(&self) -> String {
        match self {
            Self::Json(value) => value.to_string(),
            Self::Raw(text) => text.clone(),
        }
    }
}

/// A concrete request after variable substitution. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedRequest {
    /// HTTP method
    pub method: HttpMethod,
    /// Final URL including the query string
    pub url: String,
    /// Enabled headers in send order
    pub headers: Vec<(String, String)>,
    /// Body, only present for POST, PUT and PATCH
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<ResolvedBody>,
}

impl ResolvedRequest {
    /// Returns the first header value for `name`, ignoring ASCII case.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}
