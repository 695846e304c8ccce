//! Dynamic secret and lease routes: `/dynamic-secret/*` and
//! `/dynamic-secret-leases/*`.
//!
//! Dynamic secrets are addressed by project slug. Every route accepts
//! `?projectSlug=&environment=&path=` to override the configured context.
//! Lease ids live under their own prefix so no secret name can collide
//! with them.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, post};
use axum::Router;
use infisical_client::types::{CreateLeaseResponse, DynamicSecret, DynamicSecretLease};

use crate::error::AppError;
use crate::extract::{Json, Query};
use crate::service::{
    CreateDynamicSecretRequest, DeleteDynamicSecretQuery, DynamicScope, LeaseRequest,
};
use crate::state::AppState;

/// Build the dynamic secrets router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/dynamic-secret", post(create_dynamic_secret))
        .route("/dynamic-secret/{name}", delete(delete_dynamic_secret))
        .route("/dynamic-secret/{name}/leases", post(create_lease))
        .route("/dynamic-secret-leases/{lease_id}", delete(revoke_lease))
        .route("/dynamic-secret-leases/{lease_id}/renew", post(renew_lease))
}

async fn create_dynamic_secret(
    State(state): State<Arc<AppState>>,
    Query(scope): Query<DynamicScope>,
    Json(body): Json<CreateDynamicSecretRequest>,
) -> Result<(StatusCode, Json<DynamicSecret>), AppError> {
    let created = state.service.create_dynamic_secret(scope, body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn delete_dynamic_secret(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Query(scope): Query<DynamicScope>,
    Query(query): Query<DeleteDynamicSecretQuery>,
) -> Result<Json<DynamicSecret>, AppError> {
    let deleted = state
        .service
        .delete_dynamic_secret(&name, scope, query)
        .await?;
    Ok(Json(deleted))
}

async fn create_lease(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Query(scope): Query<DynamicScope>,
    body: Option<Json<LeaseRequest>>,
) -> Result<(StatusCode, Json<CreateLeaseResponse>), AppError> {
    let body = body.map(|Json(b)| b).unwrap_or_default();
    let issued = state.service.create_lease(&name, scope, body).await?;
    Ok((StatusCode::CREATED, Json(issued)))
}

async fn renew_lease(
    State(state): State<Arc<AppState>>,
    Path(lease_id): Path<String>,
    Query(scope): Query<DynamicScope>,
    body: Option<Json<LeaseRequest>>,
) -> Result<Json<DynamicSecretLease>, AppError> {
    let body = body.map(|Json(b)| b).unwrap_or_default();
    let lease = state.service.renew_lease(&lease_id, scope, body).await?;
    Ok(Json(lease))
}

async fn revoke_lease(
    State(state): State<Arc<AppState>>,
    Path(lease_id): Path<String>,
    Query(scope): Query<DynamicScope>,
    Query(query): Query<DeleteDynamicSecretQuery>,
) -> Result<Json<DynamicSecretLease>, AppError> {
    let lease = state.service.revoke_lease(&lease_id, scope, query).await?;
    Ok(Json(lease))
}
