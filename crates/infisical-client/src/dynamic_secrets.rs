//! Dynamic secrets and their leases: `/api/v1/dynamic-secrets` and
//! `/api/v1/dynamic-secret-leases`.

use serde::Serialize;

use crate::client::{ApiRequest, segment};
use crate::error::InfisicalError;
use crate::types::{
    CreateDynamicSecretOptions, CreateLeaseOptions, CreateLeaseResponse,
    DeleteDynamicSecretOptions, DeleteLeaseOptions, DynamicSecretProvider,
    DynamicSecretResponse, DynamicSecretScope, LeaseResponse, RenewLeaseOptions,
};
use crate::InfisicalClient;

/// Manage dynamic secret definitions. Obtained from
/// [`InfisicalClient::dynamic_secrets`].
#[derive(Debug, Clone, Copy)]
pub struct DynamicSecretsApi<'a> {
    client: &'a InfisicalClient,
}

/// Issue, renew and revoke dynamic secret leases.
#[derive(Debug, Clone, Copy)]
pub struct LeasesApi<'a> {
    client: &'a InfisicalClient,
}

impl InfisicalClient {
    /// Dynamic secret operations.
    pub fn dynamic_secrets(&self) -> DynamicSecretsApi<'_> {
        DynamicSecretsApi { client: self }
    }
}

/// Scope fields shared by every dynamic secret request body.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScopeBody<'a> {
    project_slug: &'a str,
    environment_slug: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<&'a str>,
}

impl<'a> From<&'a DynamicSecretScope> for ScopeBody<'a> {
    fn from(scope: &'a DynamicSecretScope) -> Self {
        Self {
            project_slug: &scope.project_slug,
            environment_slug: &scope.environment_slug,
            path: scope.path.as_deref(),
        }
    }
}

#[derive(Serialize)]
struct CreateDynamicSecretBody<'a> {
    #[serde(flatten)]
    scope: ScopeBody<'a>,
    name: &'a str,
    provider: &'a DynamicSecretProvider,
    #[serde(rename = "defaultTTL")]
    default_ttl: &'a str,
    #[serde(rename = "maxTTL", skip_serializing_if = "Option::is_none")]
    max_ttl: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ForcedScopeBody<'a> {
    #[serde(flatten)]
    scope: ScopeBody<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_forced: Option<bool>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateLeaseBody<'a> {
    #[serde(flatten)]
    scope: ScopeBody<'a>,
    dynamic_secret_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    ttl: Option<&'a str>,
}

#[derive(Serialize)]
struct RenewLeaseBody<'a> {
    #[serde(flatten)]
    scope: ScopeBody<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ttl: Option<&'a str>,
}

fn require(value: &str, what: &str) -> Result<(), InfisicalError> {
    if value.is_empty() {
        return Err(InfisicalError::InvalidInput(format!("{what} must not be empty")));
    }
    Ok(())
}

fn create_request(opts: &CreateDynamicSecretOptions) -> Result<ApiRequest, InfisicalError> {
    require(&opts.name, "dynamic secret name")?;
    require(&opts.scope.project_slug, "project slug")?;
    ApiRequest::post("/api/v1/dynamic-secrets").json(&CreateDynamicSecretBody {
        scope: (&opts.scope).into(),
        name: &opts.name,
        provider: &opts.provider,
        default_ttl: &opts.default_ttl,
        max_ttl: opts.max_ttl.as_deref(),
    })
}

impl DynamicSecretsApi<'_> {
    /// Lease operations for dynamic secrets.
    pub fn leases(&self) -> LeasesApi<'_> {
        LeasesApi {
            client: self.client,
        }
    }

    /// Create a dynamic secret definition.
    ///
    /// # Errors
    ///
    /// `InfisicalError::InvalidInput` for an empty name or project slug; any
    /// transport or API error otherwise (the API validates provider inputs).
    pub async fn create(
        &self,
        opts: &CreateDynamicSecretOptions,
    ) -> Result<DynamicSecretResponse, InfisicalError> {
        self.client.send(&create_request(opts)?).await
    }

    /// Delete a dynamic secret definition and revoke its leases.
    ///
    /// # Errors
    ///
    /// `InfisicalError::NotFound` if no such dynamic secret exists.
    pub async fn delete(
        &self,
        name: &str,
        opts: &DeleteDynamicSecretOptions,
    ) -> Result<DynamicSecretResponse, InfisicalError> {
        require(name, "dynamic secret name")?;
        let request = ApiRequest::delete(format!("/api/v1/dynamic-secrets/{}", segment(name)))
            .json(&ForcedScopeBody {
                scope: (&opts.scope).into(),
                is_forced: opts.is_forced,
            })?;
        self.client.send(&request).await
    }
}

impl LeasesApi<'_> {
    /// Issue a new lease (fresh credentials) for a dynamic secret.
    ///
    /// # Errors
    ///
    /// Any transport or API error, including provider failures reported by
    /// the API.
    pub async fn create(
        &self,
        opts: &CreateLeaseOptions,
    ) -> Result<CreateLeaseResponse, InfisicalError> {
        require(&opts.dynamic_secret_name, "dynamic secret name")?;
        let request = ApiRequest::post("/api/v1/dynamic-secret-leases").json(&CreateLeaseBody {
            scope: (&opts.scope).into(),
            dynamic_secret_name: &opts.dynamic_secret_name,
            ttl: opts.ttl.as_deref(),
        })?;
        self.client.send(&request).await
    }

    /// Extend a lease.
    ///
    /// # Errors
    ///
    /// `InfisicalError::NotFound` if the lease does not exist.
    pub async fn renew(
        &self,
        lease_id: &str,
        opts: &RenewLeaseOptions,
    ) -> Result<LeaseResponse, InfisicalError> {
        require(lease_id, "lease id")?;
        let request = ApiRequest::post(format!(
            "/api/v1/dynamic-secret-leases/{}/renew",
            segment(lease_id)
        ))
        .json(&RenewLeaseBody {
            scope: (&opts.scope).into(),
            ttl: opts.ttl.as_deref(),
        })?;
        self.client.send(&request).await
    }

    /// Revoke a lease.
    ///
    /// # Errors
    ///
    /// `InfisicalError::NotFound` if the lease does not exist.
    pub async fn delete(
        &self,
        lease_id: &str,
        opts: &DeleteLeaseOptions,
    ) -> Result<LeaseResponse, InfisicalError> {
        require(lease_id, "lease id")?;
        let request =
            ApiRequest::delete(format!("/api/v1/dynamic-secret-leases/{}", segment(lease_id)))
                .json(&ForcedScopeBody {
                    scope: (&opts.scope).into(),
                    is_forced: opts.is_forced,
                })?;
        self.client.send(&request).await
    }
}
