//! Shared handler state.

use std::sync::Arc;

use axum::http::HeaderName;
use workbench_application::{Clock, EnvironmentRepository, HttpClient, TemplateRepository};
use workbench_infrastructure::{
    FileEnvironmentRepository, FileTemplateRepository, ReqwestHttpClient, SystemClock,
    TokioFileSystem,
};

use crate::config::Settings;

/// Errors building the state from settings.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// The configured user header is not a valid header name.
    #[error("invalid auth.user_header: {0}")]
    UserHeader(String),

    /// The outbound client could not be built.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Everything handlers need, cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Outbound HTTP client.
    pub client: Arc<dyn HttpClient>,
    /// Environment storage.
    pub environments: Arc<dyn EnvironmentRepository>,
    /// Template storage.
    pub templates: Arc<dyn TemplateRepository>,
    /// Time source.
    pub clock: Arc<dyn Clock>,
    /// Header carrying the authenticated user id.
    pub user_header: HeaderName,
}

impl AppState {
    /// Wires the production adapters from settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the user header is invalid or the HTTP client
    /// cannot be built.
    pub fn from_settings(settings: &Settings) -> Result<Self, StateError> {
        let user_header = HeaderName::try_from(settings.auth.user_header.as_str())
            .map_err(|e| StateError::UserHeader(e.to_string()))?;
        let client = ReqwestHttpClient::new(&settings.http.user_agent, settings.http_timeout())
            .map_err(|e| StateError::HttpClient(e.to_string()))?;
        let data_dir = &settings.storage.data_dir;

        Ok(Self {
            client: Arc::new(client),
            environments: Arc::new(FileEnvironmentRepository::new(TokioFileSystem::new(), data_dir)),
            templates: Arc::new(FileTemplateRepository::new(TokioFileSystem::new(), data_dir)),
            clock: Arc::new(SystemClock::new()),
            user_header,
        })
    }
}
