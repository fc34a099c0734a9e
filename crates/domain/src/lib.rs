//! Workbench Domain - Core business types
//!
//! This crate defines the domain model for the Workbench request builder:
//! request templates, environments, resolved requests and response snapshots.
//! All types here are pure Rust with no I/O dependencies.

pub mod environment;
pub mod error;
pub mod id;
pub mod request;
pub mod response;

pub use environment::{Environment, select_active};
pub use error::{DomainError, DomainResult};
pub use id::{generate_id, parse_id};
pub use request::{
    Header, Headers, HttpMethod, QueryParam, QueryParams, RequestDraft, RequestTemplate,
    ResolvedBody, ResolvedRequest,
};
pub use response::{ResponseData, ResponseSnapshot};
