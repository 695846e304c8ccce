//! Async client for the Infisical REST API.
//!
//! Authenticates as a machine identity (universal auth) or with a pre-issued
//! access token, and exposes one method per backend operation, grouped the
//! way the backend groups them: secrets, dynamic secrets, projects,
//! environments, folders, and KMS.
//!
//! # Example
//!
//! ```rust,no_run
//! use infisical_client::types::GetSecretOptions;
//! use infisical_client::{Credentials, InfisicalClient, InfisicalConfig};
//!
//! # async fn example() -> Result<(), infisical_client::InfisicalError> {
//! let client = InfisicalClient::with_config(InfisicalConfig {
//!     credentials: Credentials::UniversalAuth {
//!         client_id: "machine-identity-id".to_owned(),
//!         client_secret: "machine-identity-secret".to_owned(),
//!     },
//!     ..Default::default()
//! })?;
//!
//! let secret = client
//!     .secrets()
//!     .get("DATABASE_URL", &GetSecretOptions::new("project-id", "dev"))
//!     .await?;
//! assert_eq!(secret.secret.secret_key, "DATABASE_URL");
//! # Ok(())
//! # }
//! ```

mod auth;
mod client;
mod dynamic_secrets;
mod error;
mod folders;
mod kms;
mod projects;
mod secrets;
pub mod types;

pub use auth::Credentials;
pub use dynamic_secrets::{DynamicSecretsApi, LeasesApi};
pub use error::InfisicalError;
pub use folders::FoldersApi;
pub use kms::KmsApi;
pub use projects::{EnvironmentsApi, ProjectsApi};
pub use secrets::SecretsApi;

use std::time::Duration;

use tokio::sync::RwLock;

use crate::auth::CachedToken;

/// Infisical Cloud. Self-hosted instances override this.
pub const DEFAULT_SITE_URL: &str = "https://app.infisical.com";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_MAX_RETRIES: u32 = 3;
const RETRY_BASE_DELAY: Duration = Duration::from_millis(500);

/// Configuration for [`InfisicalClient`].
#[derive(Debug, Clone)]
pub struct InfisicalConfig {
    /// How the client authenticates against the API.
    pub credentials: Credentials,
    /// API base URL. Default: `https://app.infisical.com`.
    pub site_url: String,
    /// Per-request timeout. Default: 10 seconds.
    pub timeout: Duration,
    /// Extra attempts on retryable failures. Default: 3.
    pub max_retries: u32,
}

impl Default for InfisicalConfig {
    fn default() -> Self {
        Self {
            credentials: Credentials::AccessToken(String::new()),
            site_url: DEFAULT_SITE_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

/// Infisical API client.
///
/// Cheap to share behind an `Arc`; the underlying `reqwest::Client` pools
/// connections and the access token is cached across calls.
pub struct InfisicalClient {
    site_url: String,
    credentials: Credentials,
    max_retries: u32,
    http: reqwest::Client,
    token: RwLock<Option<CachedToken>>,
}

impl std::fmt::Debug for InfisicalClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InfisicalClient")
            .field("site_url", &self.site_url)
            .field("credentials", &self.credentials)
            .field("max_retries", &self.max_retries)
            .finish_non_exhaustive()
    }
}
