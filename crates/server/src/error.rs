//! API error responses.
//!
//! Every failure leaves the service as `{ "error": message, "status": code }`.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;
use workbench_application::{ApplicationError, ExecuteRequestError};
use workbench_domain::DomainError;

/// Error returned by handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed or incomplete input.
    #[error("{0}")]
    BadRequest(String),

    /// No authenticated user on the request.
    #[error("authentication required")]
    Unauthorized,

    /// The resource does not exist for this user.
    #[error("{0}")]
    NotFound(String),

    /// Transport, storage or any other server-side failure.
    #[error("{0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    status: u16,
}

impl ApiError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        let body = ErrorBody {
            error: self.to_string(),
            status: status.as_u16(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(error: ApplicationError) -> Self {
        match error {
            ApplicationError::Validation(message) => Self::BadRequest(message),
            ApplicationError::NotFound(what) => Self::NotFound(format!("{what} not found")),
            ApplicationError::Storage(message) | ApplicationError::Transport(message) => {
                Self::Internal(message)
            }
        }
    }
}

impl From<ExecuteRequestError> for ApiError {
    fn from(error: ExecuteRequestError) -> Self {
        ApplicationError::from(error).into()
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        Self::BadRequest(error.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use workbench_application::HttpClientError;

    #[test]
    fn test_validation_maps_to_bad_request() {
        let error: ApiError = ExecuteRequestError::EmptyUrl.into();
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error.to_string(), "URL is required");
    }

    #[test]
    fn test_transport_maps_to_internal() {
        let error: ApiError =
            ExecuteRequestError::Transport(HttpClientError::Connection("refused".into())).into();
        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.to_string(), "Connection failed: refused");
    }

    #[test]
    fn test_not_found_message() {
        let error: ApiError = ApplicationError::NotFound("template 1".into()).into();
        assert_eq!(error.status(), StatusCode::NOT_FOUND);
        assert_eq!(error.to_string(), "template 1 not found");
    }
}
