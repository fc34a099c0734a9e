//! Layered configuration.
//!
//! Sources, lowest precedence first: built-in defaults, an optional
//! `workbench.toml` (or the file passed explicitly), then environment
//! variables such as `WORKBENCH__SERVER__PORT=9000`.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

const ENV_PREFIX: &str = "WORKBENCH";
const DEFAULT_FILE: &str = "workbench";

/// Complete service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Listener settings.
    pub server: ServerSettings,
    /// Where records are stored.
    pub storage: StorageSettings,
    /// How the caller's identity reaches the service.
    pub auth: AuthSettings,
    /// Outbound HTTP client settings.
    pub http: HttpSettings,
    /// Logging settings.
    pub log: LogSettings,
}

/// Listener settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Storage settings.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// Root directory for per-user JSON records.
    pub data_dir: PathBuf,
}

/// Authentication settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    /// Header carrying the authenticated user id, set by the fronting
    /// auth layer.
    pub user_header: String,
}

/// Outbound HTTP settings.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpSettings {
    /// Per-request timeout; unset means no timeout.
    pub timeout_secs: Option<u64>,
    /// User-Agent sent on proxied requests.
    pub user_agent: String,
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    pub filter: String,
}

impl Settings {
    /// Loads settings from the default file and the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or a value has the wrong
    /// type.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::from_sources(file, None)
    }

    /// Loads settings, optionally replacing the process environment with
    /// `env` (keys like `WORKBENCH__SERVER__PORT`).
    ///
    /// An explicit `file` must exist; the default `workbench.toml` may be
    /// absent.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or a value has the wrong
    /// type.
    pub fn from_sources(
        file: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        let file_source = match file {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_FILE).required(false),
        };

        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8787)?
            .set_default(
                "storage.data_dir",
                default_data_dir().to_string_lossy().into_owned(),
            )?
            .set_default("auth.user_header", "x-user-id")?
            .set_default(
                "http.user_agent",
                format!("Workbench/{}", env!("CARGO_PKG_VERSION")),
            )?
            .set_default("log.filter", "info")?
            .add_source(file_source)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()?
            .try_deserialize()
    }

    /// Socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns an error if host and port do not form a valid address.
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.server.host, self.server.port).parse()
    }

    /// Outbound timeout, if configured.
    #[must_use]
    pub fn http_timeout(&self) -> Option<Duration> {
        self.http.timeout_secs.map(Duration::from_secs)
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir().map_or_else(|| PathBuf::from("./data"), |dir| dir.join("workbench"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn env(pairs: &[(&str, &str)]) -> Option<HashMap<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::from_sources(None, env(&[])).unwrap();
        assert_eq!(settings.server.port, 8787);
        assert_eq!(settings.auth.user_header, "x-user-id");
        assert_eq!(settings.http_timeout(), None);
        assert!(settings.http.user_agent.starts_with("Workbench/"));
        assert_eq!(settings.log.filter, "info");
        assert_eq!(settings.bind_addr().unwrap().port(), 8787);
    }

    #[test]
    fn test_environment_overrides() {
        let settings = Settings::from_sources(
            None,
            env(&[
                ("WORKBENCH__SERVER__PORT", "9000"),
                ("WORKBENCH__HTTP__TIMEOUT_SECS", "30"),
                ("WORKBENCH__STORAGE__DATA_DIR", "/tmp/wb"),
            ]),
        )
        .unwrap();
        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.http_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(settings.storage.data_dir, PathBuf::from("/tmp/wb"));
    }

    #[test]
    fn test_file_then_environment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("workbench.toml");
        std::fs::write(
            &path,
            "[server]\nport = 7000\nhost = \"127.0.0.1\"\n\n[auth]\nuser_header = \"x-forwarded-user\"\n",
        )
        .unwrap();

        let settings = Settings::from_sources(
            Some(path.as_path()),
            env(&[("WORKBENCH__SERVER__PORT", "7100")]),
        )
        .unwrap();
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.server.port, 7100);
        assert_eq!(settings.auth.user_header, "x-forwarded-user");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let missing = Path::new("/nonexistent/workbench.toml");
        let result = Settings::from_sources(Some(missing), env(&[]));
        assert!(result.is_err());
    }
}
