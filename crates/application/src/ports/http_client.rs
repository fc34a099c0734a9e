//! HTTP Client port

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use thiserror::Error;
use workbench_domain::{ResolvedRequest, ResponseSnapshot};

/// Boxed future returned by [`HttpClient::execute`].
pub type HttpFuture<'a> =
    Pin<Box<dyn Future<Output = Result<ResponseSnapshot, HttpClientError>> + Send + 'a>>;

/// Transport-level failures.
///
/// The variants exist for logging; callers of the execute use case only see
/// the message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HttpClientError {
    /// The final URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A header name or value was rejected by the client.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// The request exceeded the configured timeout.
    #[error("Request timed out after {timeout_ms}ms")]
    Timeout {
        /// The timeout that was hit.
        timeout_ms: u64,
    },

    /// DNS lookup, connect or TLS failure.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// The response body could not be read.
    #[error("Failed to read response body: {0}")]
    ReadBody(String),

    /// Anything else.
    #[error("{0}")]
    Other(String),
}

/// Port for executing a resolved HTTP request exactly once.
pub trait HttpClient: Send + Sync {
    /// Sends the request and normalizes the response.
    ///
    /// Implementations must not retry.
    fn execute<'a>(&'a self, request: &'a ResolvedRequest) -> HttpFuture<'a>;
}

impl<T: HttpClient + ?Sized> HttpClient for Arc<T> {
    fn execute<'a>(&'a self, request: &'a ResolvedRequest) -> HttpFuture<'a> {
        (**self).execute(request)
    }
}
