//! Secret folders: `/api/v1/folders`.

use serde::Serialize;

use crate::client::ApiRequest;
use crate::error::InfisicalError;
use crate::types::{CreateFolderOptions, FolderResponse, ListFoldersOptions, ListFoldersResponse};
use crate::InfisicalClient;

/// Create and list secret folders. Obtained from [`InfisicalClient::folders`].
#[derive(Debug, Clone, Copy)]
pub struct FoldersApi<'a> {
    client: &'a InfisicalClient,
}

impl InfisicalClient {
    /// Folder operations.
    pub fn folders(&self) -> FoldersApi<'_> {
        FoldersApi { client: self }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateFolderBody<'a> {
    workspace_id: &'a str,
    environment: &'a str,
    name: &'a str,
    path: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

impl FoldersApi<'_> {
    /// Create a folder under `path` (default `/`).
    ///
    /// # Errors
    ///
    /// `InfisicalError::InvalidInput` for an empty name; any transport or API
    /// error otherwise.
    pub async fn create(
        &self,
        opts: &CreateFolderOptions,
    ) -> Result<FolderResponse, InfisicalError> {
        if opts.name.is_empty() {
            return Err(InfisicalError::InvalidInput(
                "folder name must not be empty".to_owned(),
            ));
        }
        let request = ApiRequest::post("/api/v1/folders").json(&CreateFolderBody {
            workspace_id: &opts.project_id,
            environment: &opts.environment,
            name: &opts.name,
            path: opts.path.as_deref().unwrap_or("/"),
            description: opts.description.as_deref(),
        })?;
        self.client.send(&request).await
    }

    /// List the folders directly under `path` (or the whole tree when
    /// `recursive`).
    ///
    /// # Errors
    ///
    /// Any transport or API error.
    pub async fn list(
        &self,
        opts: &ListFoldersOptions,
    ) -> Result<ListFoldersResponse, InfisicalError> {
        let request = ApiRequest::get("/api/v1/folders")
            .query("workspaceId", &opts.project_id)
            .query("environment", &opts.environment)
            .query("path", opts.path.as_deref().unwrap_or("/"))
            .query_opt("recursive", opts.recursive);
        self.client.send(&request).await
    }
}
