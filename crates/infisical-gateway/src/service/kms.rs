//! KMS keys and the encrypt/decrypt/sign/verify operations.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use infisical_client::types::{
    CreateKmsKeyOptions, DecryptResponse, EncryptResponse, EncryptionAlgorithm, KeyUsage, KmsKey,
    PublicKeyResponse, SignOptions, SignResponse, SigningAlgorithm, SigningAlgorithmsResponse,
    VerifyOptions, VerifyResponse,
};
use serde::Deserialize;
use tracing::info;

use super::{GatewayService, or_default};
use crate::error::AppError;

/// Body of `POST /kms/keys`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateKeyRequest {
    pub name: String,
    pub description: Option<String>,
    pub encryption_algorithm: Option<EncryptionAlgorithm>,
    pub key_usage: Option<KeyUsage>,
    pub project_id: Option<String>,
}

/// Query of `GET /kms/keys/name/{keyName}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyByNameQuery {
    pub project_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EncryptRequest {
    /// Base64-encoded plaintext.
    pub plaintext: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DecryptRequest {
    pub ciphertext: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignRequest {
    /// Base64-encoded data, or a digest when `isDigest` is set.
    pub data: String,
    pub signing_algorithm: SigningAlgorithm,
    #[serde(default)]
    pub is_digest: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    pub data: String,
    pub signature: String,
    pub signing_algorithm: SigningAlgorithm,
    #[serde(default)]
    pub is_digest: bool,
}

/// Reject values that are not standard, padded base64.
fn require_base64(field: &str, value: &str) -> Result<(), AppError> {
    if value.is_empty() {
        return Err(AppError::BadRequest(format!("{field} must not be empty")));
    }
    STANDARD
        .decode(value)
        .map(|_| ())
        .map_err(|_| AppError::BadRequest(format!("{field} must be base64-encoded")))
}

impl GatewayService {
    /// # Errors
    ///
    /// Any upstream failure (duplicate names are rejected upstream).
    pub async fn create_key(&self, req: CreateKeyRequest) -> Result<KmsKey, AppError> {
        let opts = CreateKmsKeyOptions {
            project_id: or_default(req.project_id, &self.defaults.project_id),
            name: req.name,
            description: req.description,
            encryption_algorithm: req.encryption_algorithm,
            key_usage: req.key_usage,
        };
        info!(
            name = %opts.name,
            project_id = %opts.project_id,
            algorithm = ?opts.encryption_algorithm,
            "creating kms key"
        );

        let key = self.client.kms().create_key(&opts).await?.key;

        info!(key_id = %key.id, "kms key created");
        Ok(key)
    }

    /// # Errors
    ///
    /// `AppError::NotFound` for an unknown key.
    pub async fn get_key(&self, key_id: &str) -> Result<KmsKey, AppError> {
        info!(key_id, "fetching kms key");
        Ok(self.client.kms().get_key(key_id).await?.key)
    }

    /// # Errors
    ///
    /// `AppError::NotFound` for an unknown key.
    pub async fn get_key_by_name(
        &self,
        key_name: &str,
        query: KeyByNameQuery,
    ) -> Result<KmsKey, AppError> {
        let project_id = or_default(query.project_id, &self.defaults.project_id);
        info!(key_name, project_id = %project_id, "fetching kms key by name");

        let key = self
            .client
            .kms()
            .get_key_by_name(&project_id, key_name)
            .await?
            .key;

        info!(key_id = %key.id, "kms key fetched");
        Ok(key)
    }

    /// # Errors
    ///
    /// `AppError::NotFound` for an unknown key.
    pub async fn delete_key(&self, key_id: &str) -> Result<KmsKey, AppError> {
        info!(key_id, "deleting kms key");
        let key = self.client.kms().delete_key(key_id).await?.key;
        info!(key_id = %key.id, "kms key deleted");
        Ok(key)
    }

    /// # Errors
    ///
    /// `AppError::BadRequest` when the plaintext is not base64; any
    /// upstream failure otherwise.
    pub async fn encrypt(
        &self,
        key_id: &str,
        req: EncryptRequest,
    ) -> Result<EncryptResponse, AppError> {
        require_base64("plaintext", &req.plaintext)?;
        info!(key_id, "encrypting");
        Ok(self.client.kms().encrypt(key_id, &req.plaintext).await?)
    }

    /// # Errors
    ///
    /// Any upstream failure.
    pub async fn decrypt(
        &self,
        key_id: &str,
        req: DecryptRequest,
    ) -> Result<DecryptResponse, AppError> {
        if req.ciphertext.is_empty() {
            return Err(AppError::BadRequest(
                "ciphertext must not be empty".to_owned(),
            ));
        }
        info!(key_id, "decrypting");
        Ok(self.client.kms().decrypt(key_id, &req.ciphertext).await?)
    }

    /// # Errors
    ///
    /// `AppError::BadRequest` when the data is not base64; any upstream
    /// failure otherwise.
    pub async fn sign(&self, key_id: &str, req: SignRequest) -> Result<SignResponse, AppError> {
        require_base64("data", &req.data)?;
        info!(key_id, algorithm = ?req.signing_algorithm, is_digest = req.is_digest, "signing");

        let opts = SignOptions {
            data: req.data,
            signing_algorithm: req.signing_algorithm,
            is_digest: req.is_digest,
        };
        Ok(self.client.kms().sign(key_id, &opts).await?)
    }

    /// # Errors
    ///
    /// `AppError::BadRequest` when data or signature is not base64; any
    /// upstream failure otherwise.
    pub async fn verify(
        &self,
        key_id: &str,
        req: VerifyRequest,
    ) -> Result<VerifyResponse, AppError> {
        require_base64("data", &req.data)?;
        require_base64("signature", &req.signature)?;
        info!(key_id, algorithm = ?req.signing_algorithm, "verifying signature");

        let opts = VerifyOptions {
            data: req.data,
            signature: req.signature,
            signing_algorithm: req.signing_algorithm,
            is_digest: req.is_digest,
        };
        let result = self.client.kms().verify(key_id, &opts).await?;

        info!(key_id, signature_valid = result.signature_valid, "signature verified");
        Ok(result)
    }

    /// # Errors
    ///
    /// Any upstream failure (symmetric keys have no public key).
    pub async fn public_key(&self, key_id: &str) -> Result<PublicKeyResponse, AppError> {
        info!(key_id, "fetching public key");
        Ok(self.client.kms().public_key(key_id).await?)
    }

    /// # Errors
    ///
    /// Any upstream failure.
    pub async fn signing_algorithms(
        &self,
        key_id: &str,
    ) -> Result<SigningAlgorithmsResponse, AppError> {
        info!(key_id, "listing signing algorithms");
        Ok(self.client.kms().signing_algorithms(key_id).await?)
    }
}
