//! Key management: `/api/v1/kms/keys`.
//!
//! Keys never leave the server. Encryption, decryption, signing and
//! verification all happen API-side; the client only moves base64 blobs.

use serde::Serialize;

use crate::client::{ApiRequest, segment};
use crate::error::InfisicalError;
use crate::types::{
    CreateKmsKeyOptions, DecryptResponse, EncryptResponse, EncryptionAlgorithm, KeyUsage,
    KmsKeyResponse, PublicKeyResponse, SignOptions, SignResponse, SigningAlgorithm,
    SigningAlgorithmsResponse, VerifyOptions, VerifyResponse,
};
use crate::InfisicalClient;

const KEYS_PATH: &str = "/api/v1/kms/keys";

/// KMS key lifecycle and cryptographic operations. Obtained from
/// [`InfisicalClient::kms`].
#[derive(Debug, Clone, Copy)]
pub struct KmsApi<'a> {
    client: &'a InfisicalClient,
}

impl InfisicalClient {
    /// KMS operations.
    pub fn kms(&self) -> KmsApi<'_> {
        KmsApi { client: self }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateKeyBody<'a> {
    project_id: &'a str,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    encryption_algorithm: Option<EncryptionAlgorithm>,
    #[serde(skip_serializing_if = "Option::is_none")]
    key_usage: Option<KeyUsage>,
}

#[derive(Serialize)]
struct EncryptBody<'a> {
    plaintext: &'a str,
}

#[derive(Serialize)]
struct DecryptBody<'a> {
    ciphertext: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignBody<'a> {
    data: &'a str,
    signing_algorithm: SigningAlgorithm,
    is_digest: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VerifyBody<'a> {
    data: &'a str,
    signature: &'a str,
    signing_algorithm: SigningAlgorithm,
    is_digest: bool,
}

fn key_path(key_id: &str, suffix: &str) -> Result<String, InfisicalError> {
    if key_id.is_empty() {
        return Err(InfisicalError::InvalidInput(
            "key id must not be empty".to_owned(),
        ));
    }
    Ok(format!("{KEYS_PATH}/{}{suffix}", segment(key_id)))
}

impl KmsApi<'_> {
    /// Create a key. The API defaults to `aes-256-gcm` / `encrypt-decrypt`.
    ///
    /// # Errors
    ///
    /// Any transport or API error (duplicate names are rejected by the API).
    pub async fn create_key(
        &self,
        opts: &CreateKmsKeyOptions,
    ) -> Result<KmsKeyResponse, InfisicalError> {
        if opts.name.is_empty() {
            return Err(InfisicalError::InvalidInput(
                "key name must not be empty".to_owned(),
            ));
        }
        let request = ApiRequest::post(KEYS_PATH).json(&CreateKeyBody {
            project_id: &opts.project_id,
            name: &opts.name,
            description: opts.description.as_deref(),
            encryption_algorithm: opts.encryption_algorithm,
            key_usage: opts.key_usage,
        })?;
        self.client.send(&request).await
    }

    /// Fetch a key by id.
    ///
    /// # Errors
    ///
    /// `InfisicalError::NotFound` if no such key exists.
    pub async fn get_key(&self, key_id: &str) -> Result<KmsKeyResponse, InfisicalError> {
        self.client
            .send(&ApiRequest::get(key_path(key_id, "")?))
            .await
    }

    /// Fetch a key by its name within a project.
    ///
    /// # Errors
    ///
    /// `InfisicalError::NotFound` if no such key exists.
    pub async fn get_key_by_name(
        &self,
        project_id: &str,
        key_name: &str,
    ) -> Result<KmsKeyResponse, InfisicalError> {
        if key_name.is_empty() {
            return Err(InfisicalError::InvalidInput(
                "key name must not be empty".to_owned(),
            ));
        }
        let request = ApiRequest::get(format!("{KEYS_PATH}/key-name/{}", segment(key_name)))
            .query("projectId", project_id);
        self.client.send(&request).await
    }

    /// Delete a key. Ciphertexts produced with it become undecryptable.
    ///
    /// # Errors
    ///
    /// `InfisicalError::NotFound` if no such key exists.
    pub async fn delete_key(&self, key_id: &str) -> Result<KmsKeyResponse, InfisicalError> {
        self.client
            .send(&ApiRequest::delete(key_path(key_id, "")?))
            .await
    }

    /// Encrypt base64-encoded plaintext.
    ///
    /// # Errors
    ///
    /// Any transport or API error.
    pub async fn encrypt(
        &self,
        key_id: &str,
        plaintext_b64: &str,
    ) -> Result<EncryptResponse, InfisicalError> {
        let request = ApiRequest::post(key_path(key_id, "/encrypt")?).json(&EncryptBody {
            plaintext: plaintext_b64,
        })?;
        self.client.send(&request).await
    }

    /// Decrypt a ciphertext produced by [`KmsApi::encrypt`]; the plaintext
    /// comes back base64-encoded.
    ///
    /// # Errors
    ///
    /// Any transport or API error.
    pub async fn decrypt(
        &self,
        key_id: &str,
        ciphertext: &str,
    ) -> Result<DecryptResponse, InfisicalError> {
        let request =
            ApiRequest::post(key_path(key_id, "/decrypt")?).json(&DecryptBody { ciphertext })?;
        self.client.send(&request).await
    }

    /// Sign data (or a precomputed digest) with an asymmetric key.
    ///
    /// # Errors
    ///
    /// Any transport or API error.
    pub async fn sign(
        &self,
        key_id: &str,
        opts: &SignOptions,
    ) -> Result<SignResponse, InfisicalError> {
        let request = ApiRequest::post(key_path(key_id, "/sign")?).json(&SignBody {
            data: &opts.data,
            signing_algorithm: opts.signing_algorithm,
            is_digest: opts.is_digest,
        })?;
        self.client.send(&request).await
    }

    /// Verify a signature.
    ///
    /// # Errors
    ///
    /// Any transport or API error. An invalid signature is a successful call
    /// with `signature_valid == false`.
    pub async fn verify(
        &self,
        key_id: &str,
        opts: &VerifyOptions,
    ) -> Result<VerifyResponse, InfisicalError> {
        let request = ApiRequest::post(key_path(key_id, "/verify")?).json(&VerifyBody {
            data: &opts.data,
            signature: &opts.signature,
            signing_algorithm: opts.signing_algorithm,
            is_digest: opts.is_digest,
        })?;
        self.client.send(&request).await
    }

    /// Fetch the public half of an asymmetric key.
    ///
    /// # Errors
    ///
    /// Any transport or API error.
    pub async fn public_key(&self, key_id: &str) -> Result<PublicKeyResponse, InfisicalError> {
        self.client
            .send(&ApiRequest::get(key_path(key_id, "/public-key")?))
            .await
    }

    /// List the signing algorithms a key supports.
    ///
    /// # Errors
    ///
    /// Any transport or API error.
    pub async fn signing_algorithms(
        &self,
        key_id: &str,
    ) -> Result<SigningAlgorithmsResponse, InfisicalError> {
        self.client
            .send(&ApiRequest::get(key_path(key_id, "/signing-algorithms")?))
            .await
    }
}
