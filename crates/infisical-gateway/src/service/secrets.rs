use infisical_client::types::{
    CreateSecretOptions, DeleteSecretOptions, GetSecretOptions, ListSecretsOptions,
    ListSecretsResponse, Secret, SecretResponse, SecretType, UpdateSecretOptions,
};
use serde::Deserialize;
use tracing::info;

use super::{GatewayService, SecretScope};
use crate::error::AppError;

/// Query flags for `GET /secret/{secretName}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetSecretQuery {
    pub version: Option<i64>,
    #[serde(rename = "type")]
    pub secret_type: Option<SecretType>,
    pub expand_secret_references: Option<bool>,
    pub include_imports: Option<bool>,
}

/// Query flags for `GET /secrets`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSecretsQuery {
    pub recursive: Option<bool>,
    pub include_imports: Option<bool>,
    pub expand_secret_references: Option<bool>,
    /// Comma-separated tag slugs.
    pub tag_slugs: Option<String>,
}

/// Body of `POST /secret`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSecretRequest {
    pub secret_name: String,
    pub secret_value: String,
    pub secret_comment: Option<String>,
    pub skip_multiline_encoding: Option<bool>,
    #[serde(rename = "type")]
    pub secret_type: Option<SecretType>,
    #[serde(default)]
    pub tag_ids: Vec<String>,
}

/// Body of `PUT /secret/{secretName}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSecretRequest {
    pub secret_value: Option<String>,
    pub new_secret_name: Option<String>,
    pub secret_comment: Option<String>,
    pub skip_multiline_encoding: Option<bool>,
    #[serde(rename = "type")]
    pub secret_type: Option<SecretType>,
    #[serde(default)]
    pub tag_ids: Vec<String>,
}

impl GatewayService {
    /// Fetch one secret and return it without the `{ secret }` envelope.
    ///
    /// # Errors
    ///
    /// `AppError::NotFound` when the secret does not exist; any upstream
    /// failure otherwise.
    pub async fn get_secret(
        &self,
        name: &str,
        scope: SecretScope,
        query: GetSecretQuery,
    ) -> Result<Secret, AppError> {
        let scope = self.resolve(scope);
        info!(
            secret_name = name,
            environment = %scope.environment,
            secret_path = %scope.secret_path,
            "fetching secret"
        );

        let opts = GetSecretOptions {
            secret_path: Some(scope.secret_path),
            version: query.version,
            secret_type: query.secret_type,
            expand_secret_references: query.expand_secret_references,
            include_imports: query.include_imports,
            ..GetSecretOptions::new(scope.project_id, scope.environment)
        };
        let secret = self.client.secrets().get(name, &opts).await?.secret;

        info!(secret_id = %secret.id, version = ?secret.version, "secret fetched");
        Ok(secret)
    }

    /// List the secrets under the scope's path.
    ///
    /// # Errors
    ///
    /// Any upstream failure.
    pub async fn list_secrets(
        &self,
        scope: SecretScope,
        query: ListSecretsQuery,
    ) -> Result<ListSecretsResponse, AppError> {
        let scope = self.resolve(scope);
        info!(
            environment = %scope.environment,
            secret_path = %scope.secret_path,
            recursive = query.recursive.unwrap_or(false),
            "listing secrets"
        );

        let opts = ListSecretsOptions {
            secret_path: Some(scope.secret_path),
            recursive: query.recursive,
            include_imports: query.include_imports,
            expand_secret_references: query.expand_secret_references,
            tag_slugs: split_csv(query.tag_slugs.as_deref()),
            ..ListSecretsOptions::new(scope.project_id, scope.environment)
        };
        let list = self.client.secrets().list(&opts).await?;

        info!(
            secrets = list.secrets.len(),
            imports = list.imports.as_ref().map_or(0, Vec::len),
            "secrets listed"
        );
        Ok(list)
    }

    /// # Errors
    ///
    /// Any upstream failure (an existing name is rejected upstream).
    pub async fn create_secret(
        &self,
        scope: SecretScope,
        req: CreateSecretRequest,
    ) -> Result<SecretResponse, AppError> {
        let scope = self.resolve(scope);
        info!(
            secret_name = %req.secret_name,
            environment = %scope.environment,
            secret_path = %scope.secret_path,
            "creating secret"
        );

        let opts = CreateSecretOptions {
            project_id: scope.project_id,
            environment: scope.environment,
            secret_value: req.secret_value,
            secret_path: Some(scope.secret_path),
            secret_comment: req.secret_comment,
            skip_multiline_encoding: req.skip_multiline_encoding,
            secret_type: req.secret_type,
            tag_ids: req.tag_ids,
        };
        let created = self
            .client
            .secrets()
            .create(&req.secret_name, &opts)
            .await?;

        info!(secret_id = %created.secret.id, "secret created");
        Ok(created)
    }

    /// # Errors
    ///
    /// `AppError::BadRequest` when the body changes nothing; any upstream
    /// failure otherwise.
    pub async fn update_secret(
        &self,
        name: &str,
        scope: SecretScope,
        req: UpdateSecretRequest,
    ) -> Result<SecretResponse, AppError> {
        if req.secret_value.is_none()
            && req.new_secret_name.is_none()
            && req.secret_comment.is_none()
            && req.skip_multiline_encoding.is_none()
            && req.tag_ids.is_empty()
        {
            return Err(AppError::BadRequest(
                "nothing to update: pass secretValue, newSecretName, secretComment or tagIds"
                    .to_owned(),
            ));
        }

        let scope = self.resolve(scope);
        info!(
            secret_name = name,
            new_secret_name = req.new_secret_name.as_deref(),
            environment = %scope.environment,
            secret_path = %scope.secret_path,
            "updating secret"
        );

        let opts = UpdateSecretOptions {
            project_id: scope.project_id,
            environment: scope.environment,
            secret_value: req.secret_value,
            new_secret_name: req.new_secret_name,
            secret_path: Some(scope.secret_path),
            secret_comment: req.secret_comment,
            skip_multiline_encoding: req.skip_multiline_encoding,
            secret_type: req.secret_type,
            tag_ids: req.tag_ids,
        };
        let updated = self.client.secrets().update(name, &opts).await?;

        info!(
            secret_id = %updated.secret.id,
            version = ?updated.secret.version,
            "secret updated"
        );
        Ok(updated)
    }

    /// # Errors
    ///
    /// `AppError::NotFound` when the secret does not exist; any upstream
    /// failure otherwise.
    pub async fn delete_secret(
        &self,
        name: &str,
        scope: SecretScope,
        secret_type: Option<SecretType>,
    ) -> Result<SecretResponse, AppError> {
        let scope = self.resolve(scope);
        info!(
            secret_name = name,
            environment = %scope.environment,
            secret_path = %scope.secret_path,
            "deleting secret"
        );

        let opts = DeleteSecretOptions {
            project_id: scope.project_id,
            environment: scope.environment,
            secret_path: Some(scope.secret_path),
            secret_type,
        };
        let deleted = self.client.secrets().delete(name, &opts).await?;

        info!(secret_id = %deleted.secret.id, "secret deleted");
        Ok(deleted)
    }
}

fn split_csv(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect()
    })
    .unwrap_or_default()
}
