//! Workbench Application - Use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits (interfaces for HTTP, persistence and time)
//! - The `{{variable}}` substitution engine and request assembly
//! - Use case orchestration for environments, templates and sending
//! - Application-level error handling

pub mod error;
pub mod execute_request;
pub mod ports;
pub mod request_builder;
pub mod use_cases;
pub mod variable_resolver;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{ApplicationError, ApplicationResult};
pub use execute_request::{ExecuteInput, ExecuteRequest, ExecuteRequestError, ExecuteResult};
pub use ports::{
    Clock, EnvironmentError, EnvironmentRepository, FileSystem, FileSystemError, HttpClient,
    HttpClientError, TemplateError, TemplateRepository,
};
pub use request_builder::{AssembleError, assemble_request, unresolved_variables};
pub use use_cases::{
    DeleteEnvironment, DeleteTemplate, GetEnvironment, GetTemplate, ListEnvironments,
    ListEnvironmentsOutput, ListTemplates, SaveEnvironment, SaveEnvironmentInput, SaveTemplate,
    SaveTemplateInput, SelectEnvironment, SendTemplate, SendTemplateInput, TouchTemplate,
};
pub use variable_resolver::{Segment, VariableResolver, find_unresolved, highlight, substitute};
