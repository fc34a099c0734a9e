//! Request assembly
//!
//! Turns a draft plus the active environment into the concrete request that
//! goes on the wire.

use thiserror::Error;
use workbench_domain::{Environment, RequestDraft, ResolvedBody, ResolvedRequest};

use crate::variable_resolver::VariableResolver;

const CONTENT_TYPE: &str = "Content-Type";

/// Errors raised while assembling a request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AssembleError {
    /// The query string could not be encoded.
    #[error("failed to encode query parameters: {0}")]
    QueryEncoding(String),
}

/// Builds the outbound request.
///
/// - Tokens are substituted in the URL, enabled header values, query
///   parameter values and the body. Header names and parameter keys are
///   sent as typed.
/// - Disabled rows, headers with a blank name and parameters with an empty
///   key are dropped.
/// - POST, PUT and PATCH send a non-empty body. A body that parses as JSON
///   is re-serialized and forces `Content-Type: application/json`; anything
///   else goes out verbatim with the user's headers untouched.
///
/// # Errors
///
/// Returns `AssembleError::QueryEncoding` if the query string cannot be
/// encoded.
pub fn assemble_request(
    draft: &RequestDraft,
    environment: Option<&Environment>,
) -> Result<ResolvedRequest, AssembleError> {
    let resolver = VariableResolver::new(environment);

    let params: Vec<(&str, String)> = draft
        .query_params
        .sendable()
        .map(|p| (p.key.as_str(), resolver.substitute(&p.value)))
        .collect();
    let url = append_query(resolver.substitute(&draft.url), &params)?;

    let mut headers: Vec<(String, String)> = draft
        .headers
        .enabled()
        .filter(|h| !h.name.trim().is_empty())
        .map(|h| (h.name.clone(), resolver.substitute(&h.value)))
        .collect();

    let body = if draft.method.sends_body() && !draft.body.is_empty() {
        let text = resolver.substitute(&draft.body);
        match serde_json::from_str::<serde_json::Value>(&text) {
            Ok(value) => {
                headers.retain(|(name, _)| !name.eq_ignore_ascii_case(CONTENT_TYPE));
                headers.push((
                    CONTENT_TYPE.to_string(),
                    mime::APPLICATION_JSON.to_string(),
                ));
                Some(ResolvedBody::Json(value))
            }
            Err(_) => Some(ResolvedBody::Raw(text)),
        }
    } else {
        None
    };

    Ok(ResolvedRequest {
        method: draft.method,
        url,
        headers,
        body,
    })
}

/// Lists the tokens the environment cannot satisfy anywhere in the parts of
/// the draft that would be sent, in order of first appearance.
#[must_use]
pub fn unresolved_variables(draft: &RequestDraft, environment: Option<&Environment>) -> Vec<String> {
    let resolver = VariableResolver::new(environment);
    let body = draft.method.sends_body().then_some(draft.body.as_str());

    let mut names: Vec<String> = Vec::new();
    let sources = std::iter::once(draft.url.as_str())
        .chain(draft.query_params.sendable().map(|p| p.value.as_str()))
        .chain(draft.headers.enabled().map(|h| h.value.as_str()))
        .chain(body);
    for source in sources {
        for name in resolver.find_unresolved(source) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }
    names
}

/// Appends form-encoded parameters, joining with `&` when the URL already
/// has a query.
fn append_query(url: String, params: &[(&str, String)]) -> Result<String, AssembleError> {
    if params.is_empty() {
        return Ok(url);
    }

    let encoded =
        serde_urlencoded::to_string(params).map_err(|e| AssembleError::QueryEncoding(e.to_string()))?;

    let separator = if url.contains('?') { '&' } else { '?' };
    Ok(format!("{url}{separator}{encoded}"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use workbench_domain::{Header, Headers, HttpMethod, QueryParam, QueryParams};

    fn env() -> Environment {
        Environment::new("user-1", "dev", Utc::now())
            .with_variable("path", "users")
            .with_variable("term", "bob")
            .with_variable("token", "sk-1")
            .with_variable("id", "42")
    }

    fn post(body: &str, headers: Headers) -> RequestDraft {
        RequestDraft::new(HttpMethod::Post, "https://example.com/items")
            .with_headers(headers)
            .with_body(body)
    }

    #[test]
    fn test_end_to_end_get_with_query() {
        let draft = RequestDraft::new(HttpMethod::Get, "https://example.com/{{path}}")
            .with_query_params(QueryParams::from_pairs([("q", "{{term}}")]));

        let request = assemble_request(&draft, Some(&env())).unwrap();
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.url, "https://example.com/users?q=bob");
        assert!(request.body.is_none());
    }

    #[test]
    fn test_disabled_headers_are_excluded() {
        let headers: Headers = vec![
            Header::new("Authorization", "Bearer {{token}}"),
            Header::disabled("X-Debug", "{{token}}"),
            Header::disabled("Accept", "text/html"),
        ]
        .into_iter()
        .collect();
        let draft = RequestDraft::new(HttpMethod::Get, "https://example.com").with_headers(headers);

        let request = assemble_request(&draft, Some(&env())).unwrap();
        assert_eq!(
            request.headers,
            vec![("Authorization".to_string(), "Bearer sk-1".to_string())]
        );
    }

    #[test]
    fn test_header_names_are_not_substituted() {
        let draft = RequestDraft::new(HttpMethod::Get, "https://example.com")
            .with_headers(Headers::from_pairs([("X-{{token}}", "{{token}}")]));

        let request = assemble_request(&draft, Some(&env())).unwrap();
        assert_eq!(
            request.headers,
            vec![("X-{{token}}".to_string(), "sk-1".to_string())]
        );
    }

    #[test]
    fn test_query_keys_empty_dropped_empty_values_kept() {
        let params: QueryParams = vec![
            QueryParam::new("", "ignored"),
            QueryParam::new("flag", ""),
            QueryParam::disabled("debug", "1"),
            QueryParam::new("id", "{{id}}"),
        ]
        .into_iter()
        .collect();
        let draft = RequestDraft::new(HttpMethod::Get, "https://example.com/a")
            .with_query_params(params);

        let request = assemble_request(&draft, Some(&env())).unwrap();
        assert_eq!(request.url, "https://example.com/a?flag=&id=42");
    }

    #[test]
    fn test_query_values_are_form_encoded() {
        let draft = RequestDraft::new(HttpMethod::Get, "https://example.com/search")
            .with_query_params(QueryParams::from_pairs([("q", "a b&c")]));

        let request = assemble_request(&draft, None).unwrap();
        assert_eq!(request.url, "https://example.com/search?q=a+b%26c");
    }

    #[test]
    fn test_query_appends_to_existing_query() {
        let draft = RequestDraft::new(HttpMethod::Get, "https://example.com/a?page=1")
            .with_query_params(QueryParams::from_pairs([("size", "10")]));

        let request = assemble_request(&draft, None).unwrap();
        assert_eq!(request.url, "https://example.com/a?page=1&size=10");
    }

    #[test]
    fn test_json_body_forces_content_type() {
        let draft = post(
            r#"{"a":1}"#,
            Headers::from_pairs([("content-type", "text/plain"), ("Accept", "*/*")]),
        );

        let request = assemble_request(&draft, None).unwrap();
        assert_eq!(request.header("Content-Type"), Some("application/json"));
        assert_eq!(
            request
                .headers
                .iter()
                .filter(|(n, _)| n.eq_ignore_ascii_case("content-type"))
                .count(),
            1
        );
        assert_eq!(request.body, Some(ResolvedBody::Json(json!({"a": 1}))));
        assert_eq!(request.body.unwrap().to_wire_string(), r#"{"a":1}"#);
    }

    #[test]
    fn test_json_body_keeps_key_order() {
        let draft = post(r#"{ "z": 1, "a": {"y": true, "b": null} }"#, Headers::new());

        let request = assemble_request(&draft, None).unwrap();
        assert_eq!(
            request.body.unwrap().to_wire_string(),
            r#"{"z":1,"a":{"y":true,"b":null}}"#
        );
    }

    #[test]
    fn test_raw_body_without_content_type() {
        let request = assemble_request(&post("not json", Headers::new()), None).unwrap();
        assert_eq!(request.body, Some(ResolvedBody::Raw("not json".to_string())));
        assert_eq!(request.header("Content-Type"), None);
    }

    #[test]
    fn test_raw_body_keeps_user_content_type() {
        let draft = post(
            "<a>{{id}}</a>",
            Headers::from_pairs([("Content-Type", "application/xml")]),
        );

        let request = assemble_request(&draft, Some(&env())).unwrap();
        assert_eq!(request.body, Some(ResolvedBody::Raw("<a>42</a>".to_string())));
        assert_eq!(request.header("content-type"), Some("application/xml"));
    }

    #[test]
    fn test_body_substituted_before_json_parse() {
        let draft = post(r#"{"id": {{id}}}"#, Headers::new());

        let request = assemble_request(&draft, Some(&env())).unwrap();
        assert_eq!(request.body, Some(ResolvedBody::Json(json!({"id": 42}))));
    }

    #[test]
    fn test_body_ignored_for_methods_without_body() {
        for method in [
            HttpMethod::Get,
            HttpMethod::Delete,
            HttpMethod::Head,
            HttpMethod::Options,
        ] {
            let draft = RequestDraft::new(method, "https://example.com").with_body(r#"{"a":1}"#);
            let request = assemble_request(&draft, None).unwrap();
            assert!(request.body.is_none(), "{method} should not send a body");
            assert_eq!(request.header("Content-Type"), None);
        }
    }

    #[test]
    fn test_empty_body_is_not_sent() {
        let request = assemble_request(&post("", Headers::new()), None).unwrap();
        assert!(request.body.is_none());
    }

    #[test]
    fn test_blank_header_names_are_dropped() {
        let draft = RequestDraft::new(HttpMethod::Get, "https://example.com")
            .with_headers(Headers::from_pairs([(" ", "x"), ("Accept", "*/*")]));

        let request = assemble_request(&draft, None).unwrap();
        assert_eq!(request.headers.len(), 1);
    }

    #[test]
    fn test_unresolved_variables_across_draft() {
        let draft = RequestDraft::new(HttpMethod::Post, "{{base}}/{{path}}")
            .with_headers(
                [
                    Header::new("Authorization", "Bearer {{secret}}"),
                    Header::disabled("X-Debug", "{{debug}}"),
                ]
                .into_iter()
                .collect(),
            )
            .with_query_params(QueryParams::from_pairs([("q", "{{term}}"), ("page", "{{page}}")]))
            .with_body(r#"{"a":"{{base}}"}"#);

        assert_eq!(
            unresolved_variables(&draft, Some(&env())),
            vec!["base", "page", "secret"]
        );
    }

    #[test]
    fn test_get_body_tokens_are_not_reported() {
        let draft = RequestDraft::new(HttpMethod::Get, "https://example.com").with_body("{{x}}");
        assert!(unresolved_variables(&draft, None).is_empty());
    }
}
