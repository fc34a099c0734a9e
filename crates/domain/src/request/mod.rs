//! HTTP Request domain types

mod header;
mod method;
mod query;
mod resolved;
mod template;

pub use header::{Header, Headers};
pub use method::HttpMethod;
pub use query::{QueryParam, QueryParams};
pub use resolved::{ResolvedBody, ResolvedRequest};
pub use template::{RequestDraft, RequestTemplate};
