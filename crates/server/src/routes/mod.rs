//! HTTP handlers, grouped by resource.

pub mod environments;
pub mod health;
pub mod proxy;
pub mod templates;

use axum::Json;
use axum::extract::{FromRequest, Request};
use axum::extract::rejection::JsonRejection;
use serde::de::DeserializeOwned;
use uuid::Uuid;
use workbench_domain::parse_id;

use crate::error::ApiError;

/// JSON body extractor whose rejections use the service's error shape.
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(request, state).await?;
        Ok(Self(value))
    }
}

/// Parses a record id from a path segment, answering 400 when malformed.
pub(crate) fn record_id(raw: &str) -> Result<Uuid, ApiError> {
    Ok(parse_id(raw)?)
}
