//! Request template CRUD and send.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;
use uuid::Uuid;
use workbench_application::{
    DeleteTemplate, GetTemplate, ListTemplates, SaveTemplate, SaveTemplateInput, SendTemplate,
    SendTemplateInput,
};
use workbench_domain::{RequestDraft, RequestTemplate, ResponseSnapshot};

use super::{ApiJson, record_id};
use crate::auth::CurrentUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Body for creating or replacing a template.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateBody {
    /// Display name.
    pub name: String,
    /// Method, URL, headers, query parameters and body.
    #[serde(flatten)]
    pub request: RequestDraft,
    /// Environment to send with.
    #[serde(default)]
    pub environment_id: Option<Uuid>,
}

/// Optional body of `POST /api/templates/{id}/send`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendBody {
    /// Environment overriding the template's own.
    #[serde(default)]
    pub environment_id: Option<Uuid>,
}

fn save_input(user: CurrentUser, id: Option<Uuid>, body: TemplateBody) -> SaveTemplateInput {
    SaveTemplateInput {
        owner_id: user.0,
        id,
        name: body.name,
        request: body.request,
        environment_id: body.environment_id,
    }
}

/// `GET /api/templates`, most recently opened first.
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<RequestTemplate>>> {
    let templates = ListTemplates::new(state.templates)
        .execute(user.id())
        .await?;
    Ok(Json(templates))
}

/// `POST /api/templates`
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ApiJson(body): ApiJson<TemplateBody>,
) -> ApiResult<(StatusCode, Json<RequestTemplate>)> {
    let template = SaveTemplate::new(state.templates, state.clock)
        .execute(save_input(user, None, body))
        .await?;
    Ok((StatusCode::CREATED, Json(template)))
}

/// `GET /api/templates/{id}`
pub async fn get(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> ApiResult<Json<RequestTemplate>> {
    let template = GetTemplate::new(state.templates)
        .execute(user.id(), record_id(&id)?)
        .await?;
    Ok(Json(template))
}

/// `PUT /api/templates/{id}`
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<TemplateBody>,
) -> ApiResult<Json<RequestTemplate>> {
    let id = record_id(&id)?;
    let template = SaveTemplate::new(state.templates, state.clock)
        .execute(save_input(user, Some(id), body))
        .await?;
    Ok(Json(template))
}

/// `DELETE /api/templates/{id}`
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    DeleteTemplate::new(state.templates)
        .execute(user.id(), record_id(&id)?)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/templates/{id}/send`
pub async fn send(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<ResponseSnapshot>> {
    let template_id = record_id(&id)?;
    let options: SendBody = if body.is_empty() {
        SendBody::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| ApiError::BadRequest(e.to_string()))?
    };

    let response = SendTemplate::new(
        state.client,
        state.templates,
        state.environments,
        state.clock,
    )
    .execute(SendTemplateInput {
        owner_id: user.0,
        template_id,
        environment_id: options.environment_id,
    })
    .await?;
    Ok(Json(response))
}
