//! Project, environment and folder routes.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;
use infisical_client::types::{Environment, Folder, ListFoldersResponse, MembershipsResponse, Project};

use crate::error::AppError;
use crate::extract::{Json, Query};
use crate::service::{
    CreateEnvironmentRequest, CreateFolderRequest, CreateProjectRequest, InviteMembersRequest,
    ListFoldersQuery,
};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/projects", post(create_project))
        .route("/projects/{project_id}/memberships", post(invite_members))
        .route("/projects/{project_id}/environments", post(create_environment))
        .route("/folders", post(create_folder).get(list_folders))
}

async fn create_project(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<Project>), AppError> {
    let project = state.service.create_project(body).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

async fn invite_members(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<String>,
    Json(body): Json<InviteMembersRequest>,
) -> Result<(StatusCode, Json<MembershipsResponse>), AppError> {
    let memberships = state.service.invite_members(&project_id, body).await?;
    Ok((StatusCode::CREATED, Json(memberships)))
}

async fn create_environment(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<String>,
    Json(body): Json<CreateEnvironmentRequest>,
) -> Result<(StatusCode, Json<Environment>), AppError> {
    let environment = state.service.create_environment(&project_id, body).await?;
    Ok((StatusCode::CREATED, Json(environment)))
}

async fn create_folder(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateFolderRequest>,
) -> Result<(StatusCode, Json<Folder>), AppError> {
    let folder = state.service.create_folder(body).await?;
    Ok((StatusCode::CREATED, Json(folder)))
}

async fn list_folders(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListFoldersQuery>,
) -> Result<Json<ListFoldersResponse>, AppError> {
    Ok(Json(state.service.list_folders(query).await?))
}
