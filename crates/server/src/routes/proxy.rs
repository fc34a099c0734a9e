//! Ad-hoc requests: send, preview and variable highlighting.

use axum::extract::State;
use axum::{Extension, Json};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;
use workbench_application::{
    ExecuteInput, ExecuteRequest, GetEnvironment, Segment, assemble_request, highlight,
    unresolved_variables,
};
use workbench_domain::{
    Environment, Headers, HttpMethod, QueryParams, RequestDraft, ResolvedRequest, ResponseSnapshot,
};

use super::ApiJson;
use crate::auth::CurrentUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Body of `POST /api/proxy` and `POST /api/preview`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyRequest {
    /// HTTP method, case-insensitive. Defaults to GET.
    #[serde(default)]
    pub method: Option<String>,
    /// URL, may contain tokens.
    #[serde(default)]
    pub url: String,
    /// Headers to send, in order.
    #[serde(default)]
    pub headers: IndexMap<String, String>,
    /// Query parameters to append, in order.
    #[serde(default)]
    pub query_params: IndexMap<String, String>,
    /// Body as text, or any JSON value to be sent as JSON text.
    #[serde(default)]
    pub payload: Option<Value>,
    /// Saved template this send belongs to.
    #[serde(default)]
    pub template_id: Option<Uuid>,
    /// Environment to substitute from.
    #[serde(default)]
    pub environment_id: Option<Uuid>,
}

impl ProxyRequest {
    fn draft(&self) -> ApiResult<RequestDraft> {
        let method = match self.method.as_deref() {
            Some(raw) => raw.parse::<HttpMethod>()?,
            None => HttpMethod::Get,
        };
        let body = match &self.payload {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
        };

        Ok(RequestDraft::new(method, self.url.clone())
            .with_headers(Headers::from_pairs(self.headers.iter()))
            .with_query_params(QueryParams::from_pairs(self.query_params.iter()))
            .with_body(body))
    }
}

/// Resolved request as it would be sent, plus tokens left unresolved.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResponse {
    /// The assembled request.
    #[serde(flatten)]
    pub request: ResolvedRequest,
    /// Variable names the environment did not define.
    pub unresolved: Vec<String>,
}

/// Body of `POST /api/highlight`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightRequest {
    /// Text to split into segments.
    pub text: String,
    /// Environment to resolve against.
    #[serde(default)]
    pub environment_id: Option<Uuid>,
}

/// Response of `POST /api/highlight`.
#[derive(Debug, Serialize)]
pub struct HighlightResponse {
    /// Segments in input order.
    pub segments: Vec<Segment>,
}

async fn environment(
    state: &AppState,
    user: &CurrentUser,
    id: Option<Uuid>,
) -> ApiResult<Option<Environment>> {
    match id {
        Some(id) => Ok(Some(
            GetEnvironment::new(state.environments.clone())
                .execute(user.id(), id)
                .await?,
        )),
        None => Ok(None),
    }
}

/// `POST /api/proxy`
pub async fn proxy(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ApiJson(body): ApiJson<ProxyRequest>,
) -> ApiResult<Json<ResponseSnapshot>> {
    let draft = body.draft()?;
    let environment = environment(&state, &user, body.environment_id).await?;

    let input = ExecuteInput::new(user.0, draft)
        .with_environment(environment)
        .with_template(body.template_id);
    let response = ExecuteRequest::new(
        state.client.clone(),
        state.templates.clone(),
        state.clock.clone(),
    )
    .execute(input)
    .await?;

    Ok(Json(response))
}

/// `POST /api/preview`
pub async fn preview(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ApiJson(body): ApiJson<ProxyRequest>,
) -> ApiResult<Json<PreviewResponse>> {
    let draft = body.draft()?;
    draft.validate()?;
    let environment = environment(&state, &user, body.environment_id).await?;

    let request = assemble_request(&draft, environment.as_ref())
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let unresolved = unresolved_variables(&draft, environment.as_ref());

    Ok(Json(PreviewResponse {
        request,
        unresolved,
    }))
}

/// `POST /api/highlight`
pub async fn highlight_text(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ApiJson(body): ApiJson<HighlightRequest>,
) -> ApiResult<Json<HighlightResponse>> {
    let environment = environment(&state, &user, body.environment_id).await?;
    Ok(Json(HighlightResponse {
        segments: highlight(&body.text, environment.as_ref()),
    }))
}
