//! Workbench Server
//!
//! HTTP service for the request builder: proxies ad-hoc and saved
//! requests with `{{variable}}` substitution and stores each user's
//! environments and templates.
//!
//! # Routes
//!
//! - `GET /health`
//! - `POST /api/proxy`, `POST /api/preview`, `POST /api/highlight`
//! - `GET|POST /api/environments`, `GET|PUT|DELETE /api/environments/{id}`
//! - `GET|POST /api/templates`, `GET|PUT|DELETE /api/templates/{id}`
//! - `POST /api/templates/{id}/send`
//!
//! Everything under `/api` requires the user id header.

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub use config::Settings;
pub use error::{ApiError, ApiResult};
pub use state::{AppState, StateError};

use routes::{environments, health, proxy, templates};

/// Failure to start or keep serving.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// The state could not be built from settings.
    #[error(transparent)]
    State(#[from] StateError),

    /// Host and port do not form an address.
    #[error("invalid listen address: {0}")]
    Address(#[from] std::net::AddrParseError),

    /// Binding or serving failed.
    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Builds the router with tracing and request-id layers applied.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/proxy", post(proxy::proxy))
        .route("/preview", post(proxy::preview))
        .route("/highlight", post(proxy::highlight_text))
        .route(
            "/environments",
            get(environments::list).post(environments::create),
        )
        .route(
            "/environments/{id}",
            get(environments::get)
                .put(environments::update)
                .delete(environments::delete),
        )
        .route("/templates", get(templates::list).post(templates::create))
        .route(
            "/templates/{id}",
            get(templates::get)
                .put(templates::update)
                .delete(templates::delete),
        )
        .route("/templates/{id}/send", post(templates::send))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_user,
        ));

    Router::new()
        .route("/health", get(health::health))
        .nest("/api", api)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .with_state(state)
}

/// Serves until Ctrl+C.
///
/// # Errors
///
/// Returns an error if the state cannot be built or the listener fails.
pub async fn run_server(settings: Settings) -> Result<(), ServerError> {
    let state = AppState::from_settings(&settings)?;
    let addr = settings.bind_addr()?;
    let listener = TcpListener::bind(addr).await?;

    info!(
        %addr,
        data_dir = %settings.storage.data_dir.display(),
        user_header = %settings.auth.user_header,
        "listening"
    );

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(%error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
