//! Forwarding layer between HTTP handlers and the Infisical client.
//!
//! Every method issues exactly one client call. Inputs and outcome
//! identifiers are logged; secret values, plaintexts and lease credentials
//! never are. Request scope (project, environment, path) falls back to the
//! configured [`ProjectDefaults`].

mod dynamic_secrets;
mod kms;
mod projects;
mod secrets;

pub use dynamic_secrets::{CreateDynamicSecretRequest, DeleteDynamicSecretQuery, LeaseRequest};
pub use kms::{
    CreateKeyRequest, DecryptRequest, EncryptRequest, KeyByNameQuery, SignRequest, VerifyRequest,
};
pub use projects::{
    CreateEnvironmentRequest, CreateFolderRequest, CreateProjectRequest, InviteMembersRequest,
    ListFoldersQuery,
};
pub use secrets::{CreateSecretRequest, GetSecretQuery, ListSecretsQuery, UpdateSecretRequest};

use std::sync::Arc;

use infisical_client::InfisicalClient;
use infisical_client::types::DynamicSecretScope;
use serde::Deserialize;

use crate::config::ProjectDefaults;
use crate::error::AppError;

/// Per-request overrides for secret-scoped routes
/// (`?environment=&secretPath=&projectId=`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretScope {
    pub environment: Option<String>,
    pub secret_path: Option<String>,
    pub project_id: Option<String>,
}

/// Per-request overrides for dynamic-secret routes
/// (`?environment=&path=&projectSlug=`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicScope {
    pub environment: Option<String>,
    pub path: Option<String>,
    pub project_slug: Option<String>,
}

/// A [`SecretScope`] with every gap filled from the defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResolvedScope {
    pub project_id: String,
    pub environment: String,
    pub secret_path: String,
}

/// Thin service over [`InfisicalClient`].
#[derive(Debug, Clone)]
pub struct GatewayService {
    client: Arc<InfisicalClient>,
    defaults: ProjectDefaults,
}

impl GatewayService {
    pub fn new(client: Arc<InfisicalClient>, defaults: ProjectDefaults) -> Self {
        Self { client, defaults }
    }

    pub fn defaults(&self) -> &ProjectDefaults {
        &self.defaults
    }

    /// Obtain (or reuse) an access token. Backs the readiness check.
    ///
    /// # Errors
    ///
    /// Whatever the login call fails with.
    pub async fn check_auth(&self) -> Result<(), AppError> {
        self.client.authenticate().await.map_err(AppError::from)
    }

    pub(crate) fn resolve(&self, scope: SecretScope) -> ResolvedScope {
        ResolvedScope {
            project_id: or_default(scope.project_id, &self.defaults.project_id),
            environment: or_default(scope.environment, &self.defaults.environment),
            secret_path: or_default(scope.secret_path, &self.defaults.secret_path),
        }
    }

    /// Dynamic secrets are addressed by project slug, which has no useful
    /// default unless configured.
    pub(crate) fn resolve_dynamic(
        &self,
        scope: DynamicScope,
    ) -> Result<DynamicSecretScope, AppError> {
        let project_slug = non_empty(scope.project_slug)
            .or_else(|| self.defaults.project_slug.clone())
            .ok_or_else(|| {
                AppError::BadRequest(
                    "projectSlug is required (set INFISICAL_PROJECT_SLUG or pass ?projectSlug=)"
                        .to_owned(),
                )
            })?;
        Ok(DynamicSecretScope {
            project_slug,
            environment_slug: or_default(scope.environment, &self.defaults.environment),
            path: Some(or_default(scope.path, &self.defaults.secret_path)),
        })
    }
}

/// `?environment=` with no value reads as absent.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// The caller's value, or `default` when it is missing or blank.
pub(crate) fn or_default(value: Option<String>, default: &str) -> String {
    non_empty(value).unwrap_or_else(|| default.to_owned())
}
