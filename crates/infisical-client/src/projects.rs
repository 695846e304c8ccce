//! Projects and their environments: `/api/v2/workspace` and
//! `/api/v1/workspace/{id}/environments`.

use serde::Serialize;

use crate::client::{ApiRequest, segment};
use crate::error::InfisicalError;
use crate::types::{
    CreateEnvironmentOptions, CreateProjectOptions, EnvironmentResponse, InviteMembersOptions,
    MembershipsResponse, ProjectResponse, ProjectType,
};
use crate::InfisicalClient;

/// Create projects and manage their members. Obtained from
/// [`InfisicalClient::projects`].
#[derive(Debug, Clone, Copy)]
pub struct ProjectsApi<'a> {
    client: &'a InfisicalClient,
}

/// Manage the environments of a project. Obtained from
/// [`InfisicalClient::environments`].
#[derive(Debug, Clone, Copy)]
pub struct EnvironmentsApi<'a> {
    client: &'a InfisicalClient,
}

impl InfisicalClient {
    /// Project operations.
    pub fn projects(&self) -> ProjectsApi<'_> {
        ProjectsApi { client: self }
    }

    /// Environment operations.
    pub fn environments(&self) -> EnvironmentsApi<'_> {
        EnvironmentsApi { client: self }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateProjectBody<'a> {
    project_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    slug: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    project_description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    kms_key_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    template: Option<&'a str>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    project_type: Option<ProjectType>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InviteMembersBody<'a> {
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    emails: &'a [String],
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    usernames: &'a [String],
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    role_slugs: &'a [String],
}

#[derive(Serialize)]
struct CreateEnvironmentBody<'a> {
    name: &'a str,
    slug: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    position: Option<u32>,
}

impl ProjectsApi<'_> {
    /// Create a project in the organization of the authenticated identity.
    ///
    /// # Errors
    ///
    /// `InfisicalError::InvalidInput` for an empty name; any transport or
    /// API error otherwise.
    pub async fn create(
        &self,
        opts: &CreateProjectOptions,
    ) -> Result<ProjectResponse, InfisicalError> {
        if opts.project_name.is_empty() {
            return Err(InfisicalError::InvalidInput(
                "project name must not be empty".to_owned(),
            ));
        }
        let request = ApiRequest::post("/api/v2/workspace").json(&CreateProjectBody {
            project_name: &opts.project_name,
            slug: opts.slug.as_deref(),
            project_description: opts.project_description.as_deref(),
            kms_key_id: opts.kms_key_id.as_deref(),
            template: opts.template.as_deref(),
            project_type: opts.project_type,
        })?;
        self.client.send(&request).await
    }

    /// Invite users to a project by email or username.
    ///
    /// # Errors
    ///
    /// `InfisicalError::InvalidInput` when neither emails nor usernames are
    /// given; any transport or API error otherwise.
    pub async fn invite_members(
        &self,
        opts: &InviteMembersOptions,
    ) -> Result<MembershipsResponse, InfisicalError> {
        if opts.emails.is_empty() && opts.usernames.is_empty() {
            return Err(InfisicalError::InvalidInput(
                "at least one email or username is required".to_owned(),
            ));
        }
        let request = ApiRequest::post(format!(
            "/api/v2/workspace/{}/memberships",
            segment(&opts.project_id)
        ))
        .json(&InviteMembersBody {
            emails: &opts.emails,
            usernames: &opts.usernames,
            role_slugs: &opts.role_slugs,
        })?;
        self.client.send(&request).await
    }
}

impl EnvironmentsApi<'_> {
    /// Add an environment to a project.
    ///
    /// # Errors
    ///
    /// Any transport or API error (duplicate slugs are rejected by the API).
    pub async fn create(
        &self,
        opts: &CreateEnvironmentOptions,
    ) -> Result<EnvironmentResponse, InfisicalError> {
        if opts.name.is_empty() || opts.slug.is_empty() {
            return Err(InfisicalError::InvalidInput(
                "environment name and slug are required".to_owned(),
            ));
        }
        let request = ApiRequest::post(format!(
            "/api/v1/workspace/{}/environments",
            segment(&opts.project_id)
        ))
        .json(&CreateEnvironmentBody {
            name: &opts.name,
            slug: &opts.slug,
            position: opts.position,
        })?;
        self.client.send(&request).await
    }
}
