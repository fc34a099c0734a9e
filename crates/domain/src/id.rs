//! ID generation utilities.

use uuid::Uuid;

use crate::error::{DomainError, DomainResult};

/// Generates a new time-ordered UUID v7.
///
/// Ids sort in creation order, which is the listing order for environments.
#[must_use]
pub fn generate_id() -> Uuid {
    Uuid::now_v7()
}

/// Parses an identifier received from a caller.
///
/// # Errors
///
/// Returns `DomainError::InvalidIdentifier` if the string is not a UUID.
pub fn parse_id(raw: &str) -> DomainResult<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| DomainError::InvalidIdentifier(raw.to_string()))
}
