//! Secret routes: `/secret` and `/secrets`.
//!
//! Every route accepts `?environment=&secretPath=&projectId=` to override
//! the configured project context.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use infisical_client::types::{ListSecretsResponse, Secret, SecretResponse, SecretType};
use serde::Deserialize;

use crate::error::AppError;
use crate::extract::{Json, Query};
use crate::service::{
    CreateSecretRequest, GetSecretQuery, ListSecretsQuery, SecretScope, UpdateSecretRequest,
};
use crate::state::AppState;

/// Build the secrets router.
///
/// Paths:
/// - `GET    /secret/{secretName}`: read (returns the bare secret)
/// - `POST   /secret`: create
/// - `PUT    /secret/{secretName}`: update
/// - `DELETE /secret/{secretName}`: delete
/// - `GET    /secrets`: list
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/secret", post(create_secret))
        .route(
            "/secret/{secret_name}",
            get(get_secret).put(update_secret).delete(delete_secret),
        )
        .route("/secrets", get(list_secrets))
}

#[derive(Debug, Default, Deserialize)]
struct DeleteQuery {
    #[serde(rename = "type")]
    secret_type: Option<SecretType>,
}

async fn get_secret(
    State(state): State<Arc<AppState>>,
    Path(secret_name): Path<String>,
    Query(scope): Query<SecretScope>,
    Query(query): Query<GetSecretQuery>,
) -> Result<Json<Secret>, AppError> {
    let secret = state
        .service
        .get_secret(&secret_name, scope, query)
        .await?;
    Ok(Json(secret))
}

async fn list_secrets(
    State(state): State<Arc<AppState>>,
    Query(scope): Query<SecretScope>,
    Query(query): Query<ListSecretsQuery>,
) -> Result<Json<ListSecretsResponse>, AppError> {
    let list = state.service.list_secrets(scope, query).await?;
    Ok(Json(list))
}

async fn create_secret(
    State(state): State<Arc<AppState>>,
    Query(scope): Query<SecretScope>,
    Json(body): Json<CreateSecretRequest>,
) -> Result<(StatusCode, Json<SecretResponse>), AppError> {
    let created = state.service.create_secret(scope, body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_secret(
    State(state): State<Arc<AppState>>,
    Path(secret_name): Path<String>,
    Query(scope): Query<SecretScope>,
    Json(body): Json<UpdateSecretRequest>,
) -> Result<Json<SecretResponse>, AppError> {
    let updated = state
        .service
        .update_secret(&secret_name, scope, body)
        .await?;
    Ok(Json(updated))
}

async fn delete_secret(
    State(state): State<Arc<AppState>>,
    Path(secret_name): Path<String>,
    Query(scope): Query<SecretScope>,
    Query(query): Query<DeleteQuery>,
) -> Result<Json<SecretResponse>, AppError> {
    let deleted = state
        .service
        .delete_secret(&secret_name, scope, query.secret_type)
        .await?;
    Ok(Json(deleted))
}
