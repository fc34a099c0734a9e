//! Caller identity.
//!
//! Authentication happens in front of this service; it only reads the
//! user id the auth layer forwards and refuses requests without one.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated user, available to handlers as an extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser(pub String);

impl CurrentUser {
    /// The user id records are scoped to.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.0
    }
}

/// Middleware rejecting requests without a non-blank user id header.
///
/// # Errors
///
/// Returns `ApiError::Unauthorized` when the header is missing, blank or
/// not valid UTF-8.
pub async fn require_user(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = request
        .headers()
        .get(&state.user_header)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| CurrentUser(value.to_string()))
        .ok_or(ApiError::Unauthorized)?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}
