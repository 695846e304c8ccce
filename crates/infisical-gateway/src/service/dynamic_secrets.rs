use infisical_client::types::{
    CreateDynamicSecretOptions, CreateLeaseOptions, CreateLeaseResponse, DeleteDynamicSecretOptions,
    DeleteLeaseOptions, DynamicSecret, DynamicSecretLease, DynamicSecretProvider, RenewLeaseOptions,
};
use serde::Deserialize;
use tracing::info;

use super::{DynamicScope, GatewayService};
use crate::error::AppError;

/// Body of `POST /dynamic-secret`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDynamicSecretRequest {
    pub name: String,
    pub provider: DynamicSecretProvider,
    #[serde(rename = "defaultTTL")]
    pub default_ttl: String,
    #[serde(rename = "maxTTL")]
    pub max_ttl: Option<String>,
}

/// Query of `DELETE /dynamic-secret/{name}` and `DELETE /dynamic-secret-leases/{leaseId}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteDynamicSecretQuery {
    pub is_forced: Option<bool>,
}

/// Optional body of the lease create and renew routes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeaseRequest {
    pub ttl: Option<String>,
}

impl GatewayService {
    /// Create a dynamic secret and return it unwrapped.
    ///
    /// # Errors
    ///
    /// `AppError::BadRequest` without a project slug; any upstream failure
    /// otherwise (the provider inputs are validated upstream).
    pub async fn create_dynamic_secret(
        &self,
        scope: DynamicScope,
        req: CreateDynamicSecretRequest,
    ) -> Result<DynamicSecret, AppError> {
        let scope = self.resolve_dynamic(scope)?;
        info!(
            name = %req.name,
            provider = ?req.provider.kind,
            project_slug = %scope.project_slug,
            environment = %scope.environment_slug,
            default_ttl = %req.default_ttl,
            "creating dynamic secret"
        );

        let opts = CreateDynamicSecretOptions {
            scope,
            name: req.name,
            provider: req.provider,
            default_ttl: req.default_ttl,
            max_ttl: req.max_ttl,
        };
        let created = self
            .client
            .dynamic_secrets()
            .create(&opts)
            .await?
            .dynamic_secret;

        info!(id = %created.id, name = %created.name, "dynamic secret created");
        Ok(created)
    }

    /// # Errors
    ///
    /// `AppError::NotFound` when no dynamic secret has that name; any
    /// upstream failure otherwise.
    pub async fn delete_dynamic_secret(
        &self,
        name: &str,
        scope: DynamicScope,
        query: DeleteDynamicSecretQuery,
    ) -> Result<DynamicSecret, AppError> {
        let scope = self.resolve_dynamic(scope)?;
        info!(
            dynamic_secret = name,
            project_slug = %scope.project_slug,
            environment = %scope.environment_slug,
            is_forced = query.is_forced.unwrap_or(false),
            "deleting dynamic secret"
        );

        let opts = DeleteDynamicSecretOptions {
            scope,
            is_forced: query.is_forced,
        };
        let deleted = self
            .client
            .dynamic_secrets()
            .delete(name, &opts)
            .await?
            .dynamic_secret;

        info!(id = %deleted.id, "dynamic secret deleted");
        Ok(deleted)
    }

    /// Issue a lease. The response carries generated credentials, which are
    /// returned to the caller and never logged.
    ///
    /// # Errors
    ///
    /// Any upstream failure.
    pub async fn create_lease(
        &self,
        dynamic_secret_name: &str,
        scope: DynamicScope,
        req: LeaseRequest,
    ) -> Result<CreateLeaseResponse, AppError> {
        let scope = self.resolve_dynamic(scope)?;
        info!(
            dynamic_secret = dynamic_secret_name,
            project_slug = %scope.project_slug,
            ttl = req.ttl.as_deref(),
            "creating lease"
        );

        let opts = CreateLeaseOptions {
            scope,
            dynamic_secret_name: dynamic_secret_name.to_owned(),
            ttl: req.ttl,
        };
        let issued = self.client.dynamic_secrets().leases().create(&opts).await?;

        info!(lease_id = %issued.lease.id, expire_at = %issued.lease.expire_at, "lease created");
        Ok(issued)
    }

    /// # Errors
    ///
    /// `AppError::NotFound` for an unknown lease; any upstream failure
    /// otherwise.
    pub async fn renew_lease(
        &self,
        lease_id: &str,
        scope: DynamicScope,
        req: LeaseRequest,
    ) -> Result<DynamicSecretLease, AppError> {
        let scope = self.resolve_dynamic(scope)?;
        info!(lease_id, ttl = req.ttl.as_deref(), "renewing lease");

        let opts = RenewLeaseOptions {
            scope,
            ttl: req.ttl,
        };
        let lease = self
            .client
            .dynamic_secrets()
            .leases()
            .renew(lease_id, &opts)
            .await?
            .lease;

        info!(lease_id = %lease.id, expire_at = %lease.expire_at, "lease renewed");
        Ok(lease)
    }

    /// # Errors
    ///
    /// `AppError::NotFound` for an unknown lease; any upstream failure
    /// otherwise.
    pub async fn revoke_lease(
        &self,
        lease_id: &str,
        scope: DynamicScope,
        query: DeleteDynamicSecretQuery,
    ) -> Result<DynamicSecretLease, AppError> {
        let scope = self.resolve_dynamic(scope)?;
        info!(lease_id, is_forced = query.is_forced.unwrap_or(false), "revoking lease");

        let opts = DeleteLeaseOptions {
            scope,
            is_forced: query.is_forced,
        };
        let lease = self
            .client
            .dynamic_secrets()
            .leases()
            .delete(lease_id, &opts)
            .await?
            .lease;

        info!(lease_id = %lease.id, "lease revoked");
        Ok(lease)
    }
}
