//! Request options and response types for the Infisical API.
//!
//! Response types mirror the API's camelCase JSON and serialize back to the
//! same shape, so they can be handed to callers unchanged:
//!
//! - fields this crate does not model are kept in `extra` and written back
//! - optional fields the API left out stay out
//! - algorithm and type names are kept as strings, so values added by newer
//!   API releases still decode
//!
//! Request-side options use closed enums ([`SecretType`], [`SigningAlgorithm`],
//! ...) to catch typos before a call is made.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Fields of a response object that have no typed counterpart.
pub type Extra = Map<String, Value>;

// ── Secrets ──────────────────────────────────────────────────────────

/// Whether a secret is shared by the project or personal to one identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecretType {
    #[default]
    Shared,
    Personal,
}

impl std::fmt::Display for SecretType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Shared => "shared",
            Self::Personal => "personal",
        })
    }
}

/// A tag attached to a secret.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretTag {
    pub id: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// A secret with its decrypted value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Secret {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace: Option<String>,
    pub environment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    /// `shared` or `personal`.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub secret_type: Option<String>,
    pub secret_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_multiline_encoding: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<SecretTag>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// `{ "secret": ... }` envelope returned by single-secret operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecretResponse {
    pub secret: Secret,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Secrets reachable through a secret import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretImport {
    pub secret_path: String,
    pub environment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secrets: Option<Vec<Secret>>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Result of listing secrets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListSecretsResponse {
    pub secrets: Vec<Secret>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imports: Option<Vec<SecretImport>>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Options for [`SecretsApi::get`](crate::SecretsApi::get).
#[derive(Debug, Clone, Default)]
pub struct GetSecretOptions {
    pub project_id: String,
    pub environment: String,
    pub secret_path: Option<String>,
    pub version: Option<i64>,
    pub secret_type: Option<SecretType>,
    pub expand_secret_references: Option<bool>,
    pub include_imports: Option<bool>,
}

impl GetSecretOptions {
    pub fn new(project_id: impl Into<String>, environment: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            environment: environment.into(),
            ..Default::default()
        }
    }
}

/// Options for [`SecretsApi::list`](crate::SecretsApi::list).
#[derive(Debug, Clone, Default)]
pub struct ListSecretsOptions {
    pub project_id: String,
    pub environment: String,
    pub secret_path: Option<String>,
    pub recursive: Option<bool>,
    pub include_imports: Option<bool>,
    pub expand_secret_references: Option<bool>,
    pub tag_slugs: Vec<String>,
}

impl ListSecretsOptions {
    pub fn new(project_id: impl Into<String>, environment: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            environment: environment.into(),
            ..Default::default()
        }
    }
}

/// Options for [`SecretsApi::create`](crate::SecretsApi::create).
#[derive(Debug, Clone, Default)]
pub struct CreateSecretOptions {
    pub project_id: String,
    pub environment: String,
    pub secret_value: String,
    pub secret_path: Option<String>,
    pub secret_comment: Option<String>,
    pub skip_multiline_encoding: Option<bool>,
    pub secret_type: Option<SecretType>,
    pub tag_ids: Vec<String>,
}

/// Options for [`SecretsApi::update`](crate::SecretsApi::update).
#[derive(Debug, Clone, Default)]
pub struct UpdateSecretOptions {
    pub project_id: String,
    pub environment: String,
    pub secret_value: Option<String>,
    pub new_secret_name: Option<String>,
    pub secret_path: Option<String>,
    pub secret_comment: Option<String>,
    pub skip_multiline_encoding: Option<bool>,
    pub secret_type: Option<SecretType>,
    pub tag_ids: Vec<String>,
}

/// Options for [`SecretsApi::delete`](crate::SecretsApi::delete).
#[derive(Debug, Clone, Default)]
pub struct DeleteSecretOptions {
    pub project_id: String,
    pub environment: String,
    pub secret_path: Option<String>,
    pub secret_type: Option<SecretType>,
}

// ── Dynamic secrets ──────────────────────────────────────────────────

/// Backends a dynamic secret can issue credentials for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DynamicSecretProviderKind {
    SqlDatabase,
    Cassandra,
    AwsIam,
    Redis,
    AwsElasticache,
    MongoDbAtlas,
    ElasticSearch,
    MongoDb,
    RabbitMq,
    AzureEntraId,
    Ldap,
    SapHana,
    Snowflake,
    Totp,
}

/// Provider type plus its provider-specific inputs (host, credentials,
/// creation and revocation statements, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DynamicSecretProvider {
    #[serde(rename = "type")]
    pub kind: DynamicSecretProviderKind,
    pub inputs: serde_json::Value,
}

/// A dynamic secret definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicSecret {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    #[serde(rename = "type")]
    pub provider_type: String,
    #[serde(default, rename = "defaultTTL", skip_serializing_if = "Option::is_none")]
    pub default_ttl: Option<String>,
    #[serde(default, rename = "maxTTL", skip_serializing_if = "Option::is_none")]
    pub max_ttl: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// `{ "dynamicSecret": ... }` envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicSecretResponse {
    pub dynamic_secret: DynamicSecret,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Where a dynamic secret lives: project slug, environment slug, folder path.
#[derive(Debug, Clone, Default)]
pub struct DynamicSecretScope {
    pub project_slug: String,
    pub environment_slug: String,
    pub path: Option<String>,
}

/// Options for [`DynamicSecretsApi::create`](crate::DynamicSecretsApi::create).
#[derive(Debug, Clone)]
pub struct CreateDynamicSecretOptions {
    pub scope: DynamicSecretScope,
    pub name: String,
    pub provider: DynamicSecretProvider,
    /// Duration string such as `1h`.
    pub default_ttl: String,
    pub max_ttl: Option<String>,
}

/// Options for [`DynamicSecretsApi::delete`](crate::DynamicSecretsApi::delete).
#[derive(Debug, Clone, Default)]
pub struct DeleteDynamicSecretOptions {
    pub scope: DynamicSecretScope,
    /// Delete even if lease revocation fails on the provider.
    pub is_forced: Option<bool>,
}

/// One issued credential of a dynamic secret.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicSecretLease {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    pub expire_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dynamic_secret_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// `{ "lease": ... }` envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaseResponse {
    pub lease: DynamicSecretLease,
    #[serde(flatten)]
    pub extra: Extra,
}

/// A freshly issued lease together with the generated credentials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeaseResponse {
    pub lease: DynamicSecretLease,
    pub dynamic_secret: DynamicSecret,
    /// Provider-specific credentials (username, password, ...).
    pub data: serde_json::Value,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Options for [`LeasesApi::create`](crate::LeasesApi::create).
#[derive(Debug, Clone, Default)]
pub struct CreateLeaseOptions {
    pub scope: DynamicSecretScope,
    pub dynamic_secret_name: String,
    pub ttl: Option<String>,
}

/// Options for [`LeasesApi::renew`](crate::LeasesApi::renew).
#[derive(Debug, Clone, Default)]
pub struct RenewLeaseOptions {
    pub scope: DynamicSecretScope,
    pub ttl: Option<String>,
}

/// Options for [`LeasesApi::delete`](crate::LeasesApi::delete).
#[derive(Debug, Clone, Default)]
pub struct DeleteLeaseOptions {
    pub scope: DynamicSecretScope,
    pub is_forced: Option<bool>,
}

// ── Projects, environments, folders ──────────────────────────────────

/// Product a project is created for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectType {
    SecretManager,
    CertManager,
    Kms,
    Ssh,
}

/// An environment as embedded in a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEnvironment {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(flatten)]
    pub extra: Extra,
}

/// A project (called a workspace in older API paths).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub project_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_capitalization: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environments: Option<Vec<ProjectEnvironment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// `{ "project": ... }` envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectResponse {
    pub project: Project,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Options for [`ProjectsApi::create`](crate::ProjectsApi::create).
#[derive(Debug, Clone, Default)]
pub struct CreateProjectOptions {
    pub project_name: String,
    pub slug: Option<String>,
    pub project_description: Option<String>,
    pub kms_key_id: Option<String>,
    pub template: Option<String>,
    pub project_type: Option<ProjectType>,
}

/// A user's membership in a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMembership {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// `{ "memberships": [...] }` envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MembershipsResponse {
    pub memberships: Vec<ProjectMembership>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Options for [`ProjectsApi::invite_members`](crate::ProjectsApi::invite_members).
#[derive(Debug, Clone, Default)]
pub struct InviteMembersOptions {
    pub project_id: String,
    pub emails: Vec<String>,
    pub usernames: Vec<String>,
    /// Defaults to `member` on the API side when empty.
    pub role_slugs: Vec<String>,
}

/// An environment of a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// `{ "environment": ... }` envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentResponse {
    pub environment: Environment,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Options for [`EnvironmentsApi::create`](crate::EnvironmentsApi::create).
#[derive(Debug, Clone, Default)]
pub struct CreateEnvironmentOptions {
    pub project_id: String,
    pub name: String,
    pub slug: String,
    pub position: Option<u32>,
}

/// A secret folder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// `{ "folder": ... }` envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderResponse {
    pub folder: Folder,
    #[serde(flatten)]
    pub extra: Extra,
}

/// `{ "folders": [...] }` envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListFoldersResponse {
    pub folders: Vec<Folder>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Options for [`FoldersApi::create`](crate::FoldersApi::create).
#[derive(Debug, Clone, Default)]
pub struct CreateFolderOptions {
    pub project_id: String,
    pub environment: String,
    pub name: String,
    /// Parent folder path. Default `/`.
    pub path: Option<String>,
    pub description: Option<String>,
}

/// Options for [`FoldersApi::list`](crate::FoldersApi::list).
#[derive(Debug, Clone, Default)]
pub struct ListFoldersOptions {
    pub project_id: String,
    pub environment: String,
    pub path: Option<String>,
    pub recursive: Option<bool>,
}

// ── KMS ──────────────────────────────────────────────────────────────

/// What a KMS key may be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeyUsage {
    EncryptDecrypt,
    SignVerify,
}

/// Key material algorithm of a KMS key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncryptionAlgorithm {
    #[serde(rename = "aes-256-gcm")]
    Aes256Gcm,
    #[serde(rename = "aes-128-gcm")]
    Aes128Gcm,
    #[serde(rename = "RSA_4096")]
    Rsa4096,
    #[serde(rename = "ECC_NIST_P256")]
    EccNistP256,
}

/// Signature schemes supported by asymmetric KMS keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SigningAlgorithm {
    #[serde(rename = "RSASSA_PSS_SHA_256")]
    RsassaPssSha256,
    #[serde(rename = "RSASSA_PSS_SHA_384")]
    RsassaPssSha384,
    #[serde(rename = "RSASSA_PSS_SHA_512")]
    RsassaPssSha512,
    #[serde(rename = "RSASSA_PKCS1_V1_5_SHA_256")]
    RsassaPkcs1V15Sha256,
    #[serde(rename = "RSASSA_PKCS1_V1_5_SHA_384")]
    RsassaPkcs1V15Sha384,
    #[serde(rename = "RSASSA_PKCS1_V1_5_SHA_512")]
    RsassaPkcs1V15Sha512,
    #[serde(rename = "ECDSA_SHA_256")]
    EcdsaSha256,
    #[serde(rename = "ECDSA_SHA_384")]
    EcdsaSha384,
    #[serde(rename = "ECDSA_SHA_512")]
    EcdsaSha512,
}

/// A KMS key. Key material never leaves the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KmsKey {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_disabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_id: Option<String>,
    pub project_id: String,
    /// `encrypt-decrypt`, `sign-verify`, ...
    pub key_usage: String,
    /// `aes-256-gcm`, `RSA_4096`, ...
    pub encryption_algorithm: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// `{ "key": ... }` envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KmsKeyResponse {
    pub key: KmsKey,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Options for [`KmsApi::create_key`](crate::KmsApi::create_key).
#[derive(Debug, Clone)]
pub struct CreateKmsKeyOptions {
    pub project_id: String,
    pub name: String,
    pub description: Option<String>,
    pub encryption_algorithm: Option<EncryptionAlgorithm>,
    pub key_usage: Option<KeyUsage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncryptResponse {
    /// Opaque ciphertext blob.
    pub ciphertext: String,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecryptResponse {
    /// Base64-encoded plaintext.
    pub plaintext: String,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Options for [`KmsApi::sign`](crate::KmsApi::sign).
#[derive(Debug, Clone)]
pub struct SignOptions {
    /// Base64-encoded data, or a base64-encoded digest when `is_digest`.
    pub data: String,
    pub signing_algorithm: SigningAlgorithm,
    pub is_digest: bool,
}

/// Options for [`KmsApi::verify`](crate::KmsApi::verify).
#[derive(Debug, Clone)]
pub struct VerifyOptions {
    pub data: String,
    /// Base64-encoded signature.
    pub signature: String,
    pub signing_algorithm: SigningAlgorithm,
    pub is_digest: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignResponse {
    pub signature: String,
    pub key_id: String,
    pub signing_algorithm: String,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    pub signature_valid: bool,
    pub key_id: String,
    pub signing_algorithm: String,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicKeyResponse {
    /// PEM/DER public key as returned by the API.
    pub public_key: String,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigningAlgorithmsResponse {
    pub signing_algorithms: Vec<String>,
    #[serde(flatten)]
    pub extra: Extra,
}
