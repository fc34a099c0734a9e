//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The URL is missing or blank.
    #[error("URL is required")]
    MissingUrl,

    /// The HTTP method is not supported.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// A name (environment or template) is missing or blank.
    #[error("name is required")]
    MissingName,

    /// A variable name does not match the `{{name}}` token grammar.
    #[error("invalid variable name: {0}")]
    InvalidVariableName(String),

    /// An identifier is invalid or empty.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
