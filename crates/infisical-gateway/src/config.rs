//! Gateway configuration.
//!
//! Loads configuration from environment variables with sensible defaults.
//! `main` reads a `.env` file first, so every setting can live there too.

use std::net::SocketAddr;
use std::time::Duration;

use infisical_client::{Credentials, DEFAULT_SITE_URL, InfisicalConfig};

/// Default cap on in-flight API requests across the whole gateway.
pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 256;

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Address to bind the HTTP listener to.
    pub bind_addr: SocketAddr,
    /// Log level filter (e.g., `info`, `debug`, `warn`).
    pub log_level: String,
    /// Infisical API base URL.
    pub site_url: String,
    /// Machine identity client id (universal auth).
    pub client_id: Option<String>,
    /// Machine identity client secret (universal auth).
    pub client_secret: Option<String>,
    /// Pre-issued access token. Wins over universal auth when set.
    pub access_token: Option<String>,
    /// Project context applied when a request does not name its own.
    pub defaults: ProjectDefaults,
    /// Timeout for each call to the Infisical API.
    pub request_timeout: Duration,
    /// Retry attempts for transient Infisical failures.
    pub max_retries: u32,
    /// Whether to serve `/openapi.json` and the Swagger UI.
    pub enable_docs: bool,
    /// In-flight request cap shared by every API route.
    pub max_concurrent_requests: usize,
}

/// Project context used by every forwarded call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDefaults {
    /// Project (workspace) id for secrets, folders and KMS.
    pub project_id: String,
    /// Project slug for dynamic secrets, which are addressed by slug.
    pub project_slug: Option<String>,
    /// Environment slug.
    pub environment: String,
    /// Folder path secrets are read from and written to.
    pub secret_path: String,
}

/// Startup configuration problems.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Neither an access token nor a full client id/secret pair was given.
    #[error(
        "missing Infisical credentials: set INFISICAL_ACCESS_TOKEN, or both INFISICAL_CLIENT_ID and INFISICAL_CLIENT_SECRET"
    )]
    MissingCredentials,
    /// No default project configured.
    #[error("missing INFISICAL_PROJECT_ID")]
    MissingProjectId,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PORT` : port to bind on, binds to `0.0.0.0` (default: `3000`)
    /// - `GATEWAY_BIND_ADDR` : full bind address (overrides `PORT`)
    /// - `GATEWAY_LOG_LEVEL` : log filter (default: `info`)
    /// - `INFISICAL_SITE_URL` : API base URL (default: `https://app.infisical.com`)
    /// - `INFISICAL_CLIENT_ID` / `INFISICAL_CLIENT_SECRET` : universal auth
    /// - `INFISICAL_ACCESS_TOKEN` : pre-issued token
    /// - `INFISICAL_PROJECT_ID` : default project id
    /// - `INFISICAL_PROJECT_SLUG` : default project slug (dynamic secrets)
    /// - `INFISICAL_ENVIRONMENT` : default environment slug (default: `dev`)
    /// - `INFISICAL_SECRET_PATH` : default secret path (default: `/`)
    /// - `GATEWAY_REQUEST_TIMEOUT` : seconds per API call (default: `10`)
    /// - `GATEWAY_MAX_RETRIES` : retries on transient failures (default: `3`)
    /// - `GATEWAY_ENABLE_DOCS` : serve OpenAPI + Swagger UI (default: `true`)
    /// - `GATEWAY_MAX_CONCURRENT_REQUESTS` : in-flight API requests (default: `256`)
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source. Empty values
    /// count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        // Priority: GATEWAY_BIND_ADDR > PORT > default 0.0.0.0:3000
        let default_addr = SocketAddr::from(([0, 0, 0, 0], 3000));
        let bind_addr = if let Some(addr) = var("GATEWAY_BIND_ADDR") {
            addr.parse().unwrap_or(default_addr)
        } else if let Some(port) = var("PORT") {
            SocketAddr::from(([0, 0, 0, 0], port.parse().unwrap_or(3000)))
        } else {
            default_addr
        };

        let log_level = var("GATEWAY_LOG_LEVEL").unwrap_or_else(|| "info".to_owned());
        let site_url = var("INFISICAL_SITE_URL").unwrap_or_else(|| DEFAULT_SITE_URL.to_owned());

        let defaults = ProjectDefaults {
            project_id: var("INFISICAL_PROJECT_ID").unwrap_or_default(),
            project_slug: var("INFISICAL_PROJECT_SLUG"),
            environment: var("INFISICAL_ENVIRONMENT").unwrap_or_else(|| "dev".to_owned()),
            secret_path: var("INFISICAL_SECRET_PATH").unwrap_or_else(|| "/".to_owned()),
        };

        let request_timeout = Duration::from_secs(
            var("GATEWAY_REQUEST_TIMEOUT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        );

        let max_retries = var("GATEWAY_MAX_RETRIES")
            .and_then(|v| v.parse().ok())
            .unwrap_or(3);

        let enable_docs = var("GATEWAY_ENABLE_DOCS")
            .map(|v| v != "false" && v != "0")
            .unwrap_or(true);

        let max_concurrent_requests = var("GATEWAY_MAX_CONCURRENT_REQUESTS")
            .and_then(|v| v.parse().ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_MAX_CONCURRENT_REQUESTS);

        Self {
            bind_addr,
            log_level,
            site_url,
            client_id: var("INFISICAL_CLIENT_ID"),
            client_secret: var("INFISICAL_CLIENT_SECRET"),
            access_token: var("INFISICAL_ACCESS_TOKEN"),
            defaults,
            request_timeout,
            max_retries,
            enable_docs,
            max_concurrent_requests,
        }
    }

    /// Credentials for the Infisical client.
    ///
    /// # Errors
    ///
    /// `ConfigError::MissingCredentials` when neither an access token nor a
    /// complete client id/secret pair is configured.
    pub fn credentials(&self) -> Result<Credentials, ConfigError> {
        if let Some(token) = &self.access_token {
            return Ok(Credentials::AccessToken(token.clone()));
        }
        match (&self.client_id, &self.client_secret) {
            (Some(client_id), Some(client_secret)) => Ok(Credentials::UniversalAuth {
                client_id: client_id.clone(),
                client_secret: client_secret.clone(),
            }),
            _ => Err(ConfigError::MissingCredentials),
        }
    }

    /// Full client configuration, after checking the gateway can operate.
    ///
    /// # Errors
    ///
    /// Missing credentials or a missing default project id.
    pub fn client_config(&self) -> Result<InfisicalConfig, ConfigError> {
        if self.defaults.project_id.is_empty() {
            return Err(ConfigError::MissingProjectId);
        }
        Ok(InfisicalConfig {
            credentials: self.credentials()?,
            site_url: self.site_url.clone(),
            timeout: self.request_timeout,
            max_retries: self.max_retries,
        })
    }
}
