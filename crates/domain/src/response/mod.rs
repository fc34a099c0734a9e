//! HTTP Response domain types

mod snapshot;

pub use snapshot::{ResponseData, ResponseSnapshot};
