//! Secrets API: `/api/v3/secrets/raw`.

use serde::Serialize;

use crate::client::{ApiRequest, segment};
use crate::error::InfisicalError;
use crate::types::{
    CreateSecretOptions, DeleteSecretOptions, GetSecretOptions, ListSecretsOptions,
    ListSecretsResponse, SecretResponse, SecretType, UpdateSecretOptions,
};
use crate::InfisicalClient;

const SECRETS_PATH: &str = "/api/v3/secrets/raw";

/// Read and write secrets. Obtained from [`InfisicalClient::secrets`].
#[derive(Debug, Clone, Copy)]
pub struct SecretsApi<'a> {
    client: &'a InfisicalClient,
}

impl InfisicalClient {
    /// Secrets operations.
    pub fn secrets(&self) -> SecretsApi<'_> {
        SecretsApi { client: self }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateSecretBody<'a> {
    workspace_id: &'a str,
    environment: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    secret_path: Option<&'a str>,
    secret_value: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    secret_comment: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    skip_multiline_encoding: Option<bool>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    secret_type: Option<SecretType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tag_ids: Option<&'a [String]>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateSecretBody<'a> {
    workspace_id: &'a str,
    environment: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    secret_path: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    secret_value: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    new_secret_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    secret_comment: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    skip_multiline_encoding: Option<bool>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    secret_type: Option<SecretType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tag_ids: Option<&'a [String]>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteSecretBody<'a> {
    workspace_id: &'a str,
    environment: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    secret_path: Option<&'a str>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    secret_type: Option<SecretType>,
}

fn non_empty(values: &[String]) -> Option<&[String]> {
    (!values.is_empty()).then_some(values)
}

fn secret_path(name: &str) -> Result<String, InfisicalError> {
    if name.is_empty() {
        return Err(InfisicalError::InvalidInput(
            "secret name must not be empty".to_owned(),
        ));
    }
    Ok(format!("{SECRETS_PATH}/{}", segment(name)))
}

fn get_request(name: &str, opts: &GetSecretOptions) -> Result<ApiRequest, InfisicalError> {
    Ok(ApiRequest::get(secret_path(name)?)
        .query("workspaceId", &opts.project_id)
        .query("environment", &opts.environment)
        .query_opt("secretPath", opts.secret_path.as_deref())
        .query_opt("version", opts.version)
        .query_opt("type", opts.secret_type)
        .query_opt("expandSecretReferences", opts.expand_secret_references)
        .query_opt("include_imports", opts.include_imports))
}

fn list_request(opts: &ListSecretsOptions) -> ApiRequest {
    let tag_slugs = (!opts.tag_slugs.is_empty()).then(|| opts.tag_slugs.join(","));
    ApiRequest::get(SECRETS_PATH)
        .query("workspaceId", &opts.project_id)
        .query("environment", &opts.environment)
        .query_opt("secretPath", opts.secret_path.as_deref())
        .query_opt("recursive", opts.recursive)
        .query_opt("include_imports", opts.include_imports)
        .query_opt("expandSecretReferences", opts.expand_secret_references)
        .query_opt("tagSlugs", tag_slugs)
}

fn create_request(name: &str, opts: &CreateSecretOptions) -> Result<ApiRequest, InfisicalError> {
    ApiRequest::post(secret_path(name)?).json(&CreateSecretBody {
        workspace_id: &opts.project_id,
        environment: &opts.environment,
        secret_path: opts.secret_path.as_deref(),
        secret_value: &opts.secret_value,
        secret_comment: opts.secret_comment.as_deref(),
        skip_multiline_encoding: opts.skip_multiline_encoding,
        secret_type: opts.secret_type,
        tag_ids: non_empty(&opts.tag_ids),
    })
}

fn update_request(name: &str, opts: &UpdateSecretOptions) -> Result<ApiRequest, InfisicalError> {
    ApiRequest::patch(secret_path(name)?).json(&UpdateSecretBody {
        workspace_id: &opts.project_id,
        environment: &opts.environment,
        secret_path: opts.secret_path.as_deref(),
        secret_value: opts.secret_value.as_deref(),
        new_secret_name: opts.new_secret_name.as_deref(),
        secret_comment: opts.secret_comment.as_deref(),
        skip_multiline_encoding: opts.skip_multiline_encoding,
        secret_type: opts.secret_type,
        tag_ids: non_empty(&opts.tag_ids),
    })
}

fn delete_request(name: &str, opts: &DeleteSecretOptions) -> Result<ApiRequest, InfisicalError> {
    ApiRequest::delete(secret_path(name)?).json(&DeleteSecretBody {
        workspace_id: &opts.project_id,
        environment: &opts.environment,
        secret_path: opts.secret_path.as_deref(),
        secret_type: opts.secret_type,
    })
}

impl SecretsApi<'_> {
    /// Fetch one secret by name.
    ///
    /// # Errors
    ///
    /// `InfisicalError::NotFound` if the secret does not exist in the given
    /// environment and path; any transport or API error otherwise.
    pub async fn get(
        &self,
        name: &str,
        opts: &GetSecretOptions,
    ) -> Result<SecretResponse, InfisicalError> {
        self.client.send(&get_request(name, opts)?).await
    }

    /// List the secrets of an environment and path.
    ///
    /// # Errors
    ///
    /// Any transport or API error.
    pub async fn list(
        &self,
        opts: &ListSecretsOptions,
    ) -> Result<ListSecretsResponse, InfisicalError> {
        self.client.send(&list_request(opts)).await
    }

    /// Create a secret.
    ///
    /// # Errors
    ///
    /// `InfisicalError::Api` with status 400 if the secret already exists.
    pub async fn create(
        &self,
        name: &str,
        opts: &CreateSecretOptions,
    ) -> Result<SecretResponse, InfisicalError> {
        self.client.send(&create_request(name, opts)?).await
    }

    /// Update a secret's value, name, comment or tags.
    ///
    /// # Errors
    ///
    /// `InfisicalError::NotFound` if the secret does not exist.
    pub async fn update(
        &self,
        name: &str,
        opts: &UpdateSecretOptions,
    ) -> Result<SecretResponse, InfisicalError> {
        self.client.send(&update_request(name, opts)?).await
    }

    /// Delete a secret, returning its last state.
    ///
    /// # Errors
    ///
    /// `InfisicalError::NotFound` if the secret does not exist.
    pub async fn delete(
        &self,
        name: &str,
        opts: &DeleteSecretOptions,
    ) -> Result<SecretResponse, InfisicalError> {
        self.client.send(&delete_request(name, opts)?).await
    }
}
