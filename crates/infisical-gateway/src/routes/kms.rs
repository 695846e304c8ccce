//! KMS routes: `/kms/keys/*`.
//!
//! Plaintexts, data and signatures travel as base64 and are checked before
//! anything is forwarded.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use infisical_client::types::{
    DecryptResponse, EncryptResponse, KmsKey, PublicKeyResponse, SignResponse,
    SigningAlgorithmsResponse, VerifyResponse,
};

use crate::error::AppError;
use crate::extract::{Json, Query};
use crate::service::{
    CreateKeyRequest, DecryptRequest, EncryptRequest, KeyByNameQuery, SignRequest, VerifyRequest,
};
use crate::state::AppState;

/// Build the `/kms/keys` router.
///
/// Paths:
/// - `POST   /kms/keys`: create a key
/// - `GET    /kms/keys/{keyId}`: read a key
/// - `DELETE /kms/keys/{keyId}`: delete a key
/// - `GET    /kms/keys/name/{keyName}`: read a key by name
/// - `POST   /kms/keys/{keyId}/encrypt|decrypt|sign|verify`
/// - `GET    /kms/keys/{keyId}/public-key|signing-algorithms`
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/kms/keys", post(create_key))
        .route("/kms/keys/{key_id}", get(get_key).delete(delete_key))
        .route("/kms/keys/name/{key_name}", get(get_key_by_name))
        .route("/kms/keys/{key_id}/encrypt", post(encrypt))
        .route("/kms/keys/{key_id}/decrypt", post(decrypt))
        .route("/kms/keys/{key_id}/sign", post(sign))
        .route("/kms/keys/{key_id}/verify", post(verify))
        .route("/kms/keys/{key_id}/public-key", get(public_key))
        .route(
            "/kms/keys/{key_id}/signing-algorithms",
            get(signing_algorithms),
        )
}

async fn create_key(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateKeyRequest>,
) -> Result<(StatusCode, Json<KmsKey>), AppError> {
    let key = state.service.create_key(body).await?;
    Ok((StatusCode::CREATED, Json(key)))
}

async fn get_key(
    State(state): State<Arc<AppState>>,
    Path(key_id): Path<String>,
) -> Result<Json<KmsKey>, AppError> {
    Ok(Json(state.service.get_key(&key_id).await?))
}

async fn get_key_by_name(
    State(state): State<Arc<AppState>>,
    Path(key_name): Path<String>,
    Query(query): Query<KeyByNameQuery>,
) -> Result<Json<KmsKey>, AppError> {
    Ok(Json(state.service.get_key_by_name(&key_name, query).await?))
}

async fn delete_key(
    State(state): State<Arc<AppState>>,
    Path(key_id): Path<String>,
) -> Result<Json<KmsKey>, AppError> {
    Ok(Json(state.service.delete_key(&key_id).await?))
}

async fn encrypt(
    State(state): State<Arc<AppState>>,
    Path(key_id): Path<String>,
    Json(body): Json<EncryptRequest>,
) -> Result<Json<EncryptResponse>, AppError> {
    Ok(Json(state.service.encrypt(&key_id, body).await?))
}

async fn decrypt(
    State(state): State<Arc<AppState>>,
    Path(key_id): Path<String>,
    Json(body): Json<DecryptRequest>,
) -> Result<Json<DecryptResponse>, AppError> {
    Ok(Json(state.service.decrypt(&key_id, body).await?))
}

async fn sign(
    State(state): State<Arc<AppState>>,
    Path(key_id): Path<String>,
    Json(body): Json<SignRequest>,
) -> Result<Json<SignResponse>, AppError> {
    Ok(Json(state.service.sign(&key_id, body).await?))
}

async fn verify(
    State(state): State<Arc<AppState>>,
    Path(key_id): Path<String>,
    Json(body): Json<VerifyRequest>,
) -> Result<Json<VerifyResponse>, AppError> {
    Ok(Json(state.service.verify(&key_id, body).await?))
}

async fn public_key(
    State(state): State<Arc<AppState>>,
    Path(key_id): Path<String>,
) -> Result<Json<PublicKeyResponse>, AppError> {
    Ok(Json(state.service.public_key(&key_id).await?))
}

async fn signing_algorithms(
    State(state): State<Arc<AppState>>,
    Path(key_id): Path<String>,
) -> Result<Json<SigningAlgorithmsResponse>, AppError> {
    Ok(Json(state.service.signing_algorithms(&key_id).await?))
}
