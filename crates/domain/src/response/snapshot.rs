//! Normalized view of an upstream response

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Response body, parsed as JSON when possible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseData {
    /// The body parsed as JSON.
    Json(serde_json::Value),
    /// The body as received when it is not JSON.
    Text(String),
}

impl ResponseData {
    /// Interprets a response body, preferring JSON.
    #[must_use]
    pub fn from_body(text: String) -> Self {
        serde_json::from_str(&text).map_or(Self::Text(text), Self::Json)
    }
}

/// Status, headers and body of an executed request. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseSnapshot {
    /// HTTP status code
    pub status: u16,
    /// Reason phrase (e.g., "OK", "Not Found")
    pub status_text: String,
    /// Response headers; repeated names are joined with `", "`
    pub headers: BTreeMap<String, String>,
    /// Response body
    pub data: ResponseData,
    /// True for 2xx and 3xx statuses
    pub ok: bool,
}

impl ResponseSnapshot {
    /// Creates a snapshot, deriving `ok` from the status code.
    #[must_use]
    pub fn new(
        status: u16,
        status_text: impl Into<String>,
        headers: BTreeMap<String, String>,
        data: ResponseData,
    ) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            headers,
            data,
            ok: Self::is_ok_status(status),
        }
    }

    /// Returns true if `status` counts as success (2xx or 3xx).
    #[must_use]
    pub const fn is_ok_status(status: u16) -> bool {
        status >= 200 && status < 400
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_data_prefers_json() {
        assert_eq!(
            ResponseData::from_body(r#"{"id": 7}"#.to_string()),
            ResponseData::Json(json!({"id": 7}))
        );
        assert_eq!(
            ResponseData::from_body("<html></html>".to_string()),
            ResponseData::Text("<html></html>".to_string())
        );
        assert_eq!(
            ResponseData::from_body(String::new()),
            ResponseData::Text(String::new())
        );
    }

    #[test]
    fn test_ok_covers_2xx_and_3xx() {
        assert!(!ResponseSnapshot::is_ok_status(199));
        assert!(ResponseSnapshot::is_ok_status(200));
        assert!(ResponseSnapshot::is_ok_status(304));
        assert!(!ResponseSnapshot::is_ok_status(404));
        assert!(!ResponseSnapshot::is_ok_status(500));
    }

    #[test]
    fn test_snapshot_wire_shape() {
        let snapshot = ResponseSnapshot::new(
            201,
            "Created",
            BTreeMap::from([("content-type".to_string(), "application/json".to_string())]),
            ResponseData::Json(json!({"ok": true})),
        );

        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(
            value,
            json!({
                "status": 201,
                "statusText": "Created",
                "headers": {"content-type": "application/json"},
                "data": {"ok": true},
                "ok": true
            })
        );
    }
}
