//! Application error types

use thiserror::Error;
use workbench_domain::DomainError;

use crate::execute_request::ExecuteRequestError;
use crate::ports::{EnvironmentError, TemplateError};

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Input failed validation; nothing was sent or written.
    #[error("{0}")]
    Validation(String),

    /// The requested resource was not found for this user.
    #[error("not found: {0}")]
    NotFound(String),

    /// A storage operation failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// The outbound request failed.
    #[error("{0}")]
    Transport(String),
}

impl From<DomainError> for ApplicationError {
    fn from(error: DomainError) -> Self {
        Self::Validation(error.to_string())
    }
}

impl From<EnvironmentError> for ApplicationError {
    fn from(error: EnvironmentError) -> Self {
        match error {
            EnvironmentError::NotFound(id) => Self::NotFound(format!("environment {id}")),
            other => Self::Storage(other.to_string()),
        }
    }
}

impl From<TemplateError> for ApplicationError {
    fn from(error: TemplateError) -> Self {
        match error {
            TemplateError::NotFound(id) => Self::NotFound(format!("template {id}")),
            other => Self::Storage(other.to_string()),
        }
    }
}

impl From<ExecuteRequestError> for ApplicationError {
    fn from(error: ExecuteRequestError) -> Self {
        match error {
            ExecuteRequestError::EmptyUrl => Self::Validation(error.to_string()),
            other => Self::Transport(other.to_string()),
        }
    }
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::HttpClientError;
    use uuid::Uuid;

    #[test]
    fn test_not_found_is_preserved() {
        let id = Uuid::nil();
        let error: ApplicationError = EnvironmentError::NotFound(id).into();
        assert!(matches!(error, ApplicationError::NotFound(_)));

        let error: ApplicationError = TemplateError::NotFound(id).into();
        assert!(matches!(error, ApplicationError::NotFound(_)));
    }

    #[test]
    fn test_execute_errors_split_by_kind() {
        let error: ApplicationError = ExecuteRequestError::EmptyUrl.into();
        assert!(matches!(error, ApplicationError::Validation(_)));
        assert_eq!(error.to_string(), "URL is required");

        let error: ApplicationError =
            ExecuteRequestError::Transport(HttpClientError::Connection("refused".into())).into();
        assert!(matches!(error, ApplicationError::Transport(_)));
    }
}
