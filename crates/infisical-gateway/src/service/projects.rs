//! Projects, environments and folders.

use infisical_client::types::{
    CreateEnvironmentOptions, CreateFolderOptions, CreateProjectOptions, Environment, Folder,
    InviteMembersOptions, ListFoldersOptions, ListFoldersResponse, MembershipsResponse, Project,
    ProjectType,
};
use serde::Deserialize;
use tracing::info;

use super::{GatewayService, non_empty, or_default};
use crate::error::AppError;

/// Body of `POST /projects`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub project_name: String,
    pub slug: Option<String>,
    pub project_description: Option<String>,
    pub kms_key_id: Option<String>,
    pub template: Option<String>,
    #[serde(rename = "type")]
    pub project_type: Option<ProjectType>,
}

/// Body of `POST /projects/{projectId}/memberships`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteMembersRequest {
    #[serde(default)]
    pub emails: Vec<String>,
    #[serde(default)]
    pub usernames: Vec<String>,
    #[serde(default)]
    pub role_slugs: Vec<String>,
}

/// Body of `POST /projects/{projectId}/environments`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEnvironmentRequest {
    pub name: String,
    pub slug: String,
    pub position: Option<u32>,
}

/// Body of `POST /folders`. Project and environment fall back to the
/// configured defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFolderRequest {
    pub name: String,
    pub path: Option<String>,
    pub description: Option<String>,
    pub environment: Option<String>,
    pub project_id: Option<String>,
}

/// Query of `GET /folders`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFoldersQuery {
    pub path: Option<String>,
    pub recursive: Option<bool>,
    pub environment: Option<String>,
    pub project_id: Option<String>,
}

impl GatewayService {
    /// # Errors
    ///
    /// Any upstream failure.
    pub async fn create_project(&self, req: CreateProjectRequest) -> Result<Project, AppError> {
        info!(project_name = %req.project_name, slug = req.slug.as_deref(), "creating project");

        let opts = CreateProjectOptions {
            project_name: req.project_name,
            slug: req.slug,
            project_description: req.project_description,
            kms_key_id: req.kms_key_id,
            template: req.template,
            project_type: req.project_type,
        };
        let project = self.client.projects().create(&opts).await?.project;

        info!(project_id = %project.id, slug = %project.slug, "project created");
        Ok(project)
    }

    /// # Errors
    ///
    /// `AppError::BadRequest` without any invitee; any upstream failure
    /// otherwise.
    pub async fn invite_members(
        &self,
        project_id: &str,
        req: InviteMembersRequest,
    ) -> Result<MembershipsResponse, AppError> {
        info!(
            project_id,
            emails = req.emails.len(),
            usernames = req.usernames.len(),
            "inviting project members"
        );

        let opts = InviteMembersOptions {
            project_id: project_id.to_owned(),
            emails: req.emails,
            usernames: req.usernames,
            role_slugs: req.role_slugs,
        };
        let memberships = self.client.projects().invite_members(&opts).await?;

        info!(
            project_id,
            memberships = memberships.memberships.len(),
            "project members invited"
        );
        Ok(memberships)
    }

    /// # Errors
    ///
    /// Any upstream failure (duplicate slugs are rejected upstream).
    pub async fn create_environment(
        &self,
        project_id: &str,
        req: CreateEnvironmentRequest,
    ) -> Result<Environment, AppError> {
        info!(project_id, slug = %req.slug, "creating environment");

        let opts = CreateEnvironmentOptions {
            project_id: project_id.to_owned(),
            name: req.name,
            slug: req.slug,
            position: req.position,
        };
        let environment = self.client.environments().create(&opts).await?.environment;

        info!(environment_id = %environment.id, "environment created");
        Ok(environment)
    }

    /// # Errors
    ///
    /// Any upstream failure.
    pub async fn create_folder(&self, req: CreateFolderRequest) -> Result<Folder, AppError> {
        let opts = CreateFolderOptions {
            project_id: or_default(req.project_id, &self.defaults.project_id),
            environment: or_default(req.environment, &self.defaults.environment),
            name: req.name,
            path: req.path,
            description: req.description,
        };
        info!(
            name = %opts.name,
            path = opts.path.as_deref().unwrap_or("/"),
            environment = %opts.environment,
            "creating folder"
        );

        let folder = self.client.folders().create(&opts).await?.folder;

        info!(folder_id = %folder.id, "folder created");
        Ok(folder)
    }

    /// # Errors
    ///
    /// Any upstream failure.
    pub async fn list_folders(&self, query: ListFoldersQuery) -> Result<ListFoldersResponse, AppError> {
        let opts = ListFoldersOptions {
            project_id: or_default(query.project_id, &self.defaults.project_id),
            environment: or_default(query.environment, &self.defaults.environment),
            path: non_empty(query.path),
            recursive: query.recursive,
        };
        info!(
            path = opts.path.as_deref().unwrap_or("/"),
            environment = %opts.environment,
            "listing folders"
        );

        let list = self.client.folders().list(&opts).await?;

        info!(folders = list.folders.len(), "folders listed");
        Ok(list)
    }
}
