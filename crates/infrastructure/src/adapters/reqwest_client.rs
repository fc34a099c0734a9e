//! HTTP Client implementation using reqwest.
//!
//! Sends a [`ResolvedRequest`] once and normalizes whatever comes back into
//! a [`ResponseSnapshot`].

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, Url};
use tracing::error;
use workbench_application::ports::{HttpClient, HttpClientError, HttpFuture};
use workbench_domain::{HttpMethod, ResolvedRequest, ResponseData, ResponseSnapshot};

const MAX_REDIRECTS: usize = 10;

/// HTTP client implementation using reqwest.
///
/// Built once at startup and shared; reqwest pools connections internally.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
    timeout: Option<Duration>,
}

impl ReqwestHttpClient {
    /// Creates a client with the given user agent and optional timeout.
    ///
    /// Redirects are followed up to ten hops. Without a timeout a request
    /// waits as long as the remote end keeps the connection open.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new(user_agent: &str, timeout: Option<Duration>) -> Result<Self, HttpClientError> {
        let mut builder = Client::builder()
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self { client, timeout })
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
            HttpMethod::Head => Method::HEAD,
            HttpMethod::Options => Method::OPTIONS,
        }
    }

    /// Validates and converts the request headers.
    ///
    /// Repeated names are appended, not replaced.
    fn build_headers(headers: &[(String, String)]) -> Result<HeaderMap, HttpClientError> {
        let mut map = HeaderMap::with_capacity(headers.len());
        for (name, value) in headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| HttpClientError::InvalidHeader(format!("{name}: {e}")))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|e| HttpClientError::InvalidHeader(format!("{name}: {e}")))?;
            map.append(header_name, header_value);
        }
        Ok(map)
    }

    /// Flattens response headers, joining repeated names with `", "`.
    fn collect_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
        headers
            .keys()
            .map(|name| {
                let joined = headers
                    .get_all(name)
                    .iter()
                    .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
                    .collect::<Vec<_>>()
                    .join(", ");
                (name.as_str().to_string(), joined)
            })
            .collect()
    }

    /// Maps reqwest errors to `HttpClientError`.
    fn map_error(&self, error: &reqwest::Error) -> HttpClientError {
        if error.is_timeout() {
            let timeout_ms = self
                .timeout
                .map_or(0, |t| u64::try_from(t.as_millis()).unwrap_or(u64::MAX));
            return HttpClientError::Timeout { timeout_ms };
        }

        if error.is_connect() {
            return HttpClientError::Connection(error_chain(error));
        }

        if error.is_redirect() {
            return HttpClientError::Other(format!("Too many redirects (max {MAX_REDIRECTS})"));
        }

        HttpClientError::Other(error_chain(error))
    }
}

/// Renders an error with its sources, which is where reqwest keeps the
/// useful part (DNS failure, refused connection, TLS problem).
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

impl HttpClient for ReqwestHttpClient {
    fn execute<'a>(&'a self, request: &'a ResolvedRequest) -> HttpFuture<'a> {
        Box::pin(async move {
            let url = Url::parse(&request.url)
                .map_err(|e| HttpClientError::InvalidUrl(format!("{e}: {}", request.url)))?;
            let headers = Self::build_headers(&request.headers)?;

            let mut builder = self
                .client
                .request(Self::to_reqwest_method(request.method), url)
                .headers(headers);
            if let Some(body) = &request.body {
                builder = builder.body(body.to_wire_string());
            }

            let response = builder.send().await.map_err(|e| {
                let mapped = self.map_error(&e);
                error!(method = %request.method, url = %request.url, error = %mapped, "request failed");
                mapped
            })?;

            let status = response.status();
            let headers = Self::collect_headers(response.headers());
            let bytes = response
                .bytes()
                .await
                .map_err(|e| HttpClientError::ReadBody(error_chain(&e)))?;
            let text = String::from_utf8_lossy(&bytes).into_owned();

            Ok(ResponseSnapshot::new(
                status.as_u16(),
                status.canonical_reason().unwrap_or_default(),
                headers,
                ResponseData::from_body(text),
            ))
        })
    }
}
