//! Environment CRUD.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use workbench_application::{
    DeleteEnvironment, GetEnvironment, ListEnvironments, SaveEnvironment, SaveEnvironmentInput,
};
use workbench_domain::Environment;
use workbench_domain::environment::VariableMap;

use super::{ApiJson, record_id};
use crate::auth::CurrentUser;
use crate::error::ApiResult;
use crate::state::AppState;

/// Body for creating or replacing an environment.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentBody {
    /// Display name.
    pub name: String,
    /// Variables, replacing any stored set.
    #[serde(default)]
    pub variables: VariableMap,
    /// Make this the user's default.
    #[serde(default)]
    pub is_default: bool,
}

/// Response of `GET /api/environments`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentList {
    /// Environments in creation order.
    pub environments: Vec<Environment>,
    /// The default, else the first.
    pub active_id: Option<Uuid>,
}

fn save_input(user: CurrentUser, id: Option<Uuid>, body: EnvironmentBody) -> SaveEnvironmentInput {
    SaveEnvironmentInput {
        owner_id: user.0,
        id,
        name: body.name,
        variables: body.variables,
        is_default: body.is_default,
    }
}

/// `GET /api/environments`
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<EnvironmentList>> {
    let output = ListEnvironments::new(state.environments)
        .execute(user.id())
        .await?;
    Ok(Json(EnvironmentList {
        environments: output.environments,
        active_id: output.active_id,
    }))
}

/// `POST /api/environments`
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ApiJson(body): ApiJson<EnvironmentBody>,
) -> ApiResult<(StatusCode, Json<Environment>)> {
    let environment = SaveEnvironment::new(state.environments, state.clock)
        .execute(save_input(user, None, body))
        .await?;
    Ok((StatusCode::CREATED, Json(environment)))
}

/// `GET /api/environments/{id}`
pub async fn get(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> ApiResult<Json<Environment>> {
    let environment = GetEnvironment::new(state.environments)
        .execute(user.id(), record_id(&id)?)
        .await?;
    Ok(Json(environment))
}

/// `PUT /api/environments/{id}`
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<EnvironmentBody>,
) -> ApiResult<Json<Environment>> {
    let id = record_id(&id)?;
    let environment = SaveEnvironment::new(state.environments, state.clock)
        .execute(save_input(user, Some(id), body))
        .await?;
    Ok(Json(environment))
}

/// `DELETE /api/environments/{id}`
///
/// Templates pointing at the environment are left alone; sends fall back
/// to the default.
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    DeleteEnvironment::new(state.environments)
        .execute(user.id(), record_id(&id)?)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
