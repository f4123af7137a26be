//! Repository-related operations

use crate::client::{GhClient, GhError};
use chrono::{DateTime, Utc};
use serde::Deserialize;

const LIST_FIELDS: &str = "nameWithOwner,visibility,isArchived";
const VIEW_FIELDS: &str =
    "nameWithOwner,visibility,isArchived,description,url,defaultBranchRef,updatedAt";

/// Repository entry as reported by `gh repo list --json`
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GhRepo {
    pub name_with_owner: String,
    /// `PUBLIC`, `PRIVATE` or `INTERNAL`
    pub visibility: String,
    pub is_archived: bool,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BranchRef {
    pub name: String,
}

/// Repository details as reported by `gh repo view --json`
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GhRepoDetail {
    pub name_with_owner: String,
    pub visibility: String,
    pub is_archived: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub default_branch_ref: Option<BranchRef>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Parse the JSON array printed by `gh repo list --json`
pub fn parse_repo_list(json: &str) -> Result<Vec<GhRepo>, GhError> {
    serde_json::from_str(json)
        .map_err(|e| GhError::new(format!("failed to parse gh repo list output: {}", e)))
}

/// Parse the JSON object printed by `gh repo view --json`
pub fn parse_repo_detail(json: &str) -> Result<GhRepoDetail, GhError> {
    serde_json::from_str(json)
        .map_err(|e| GhError::new(format!("failed to parse gh repo view output: {}", e)))
}

impl GhClient {
    /// List repositories of `owner`, or of the authenticated user when `None`
    pub async fn list_repositories(
        &self,
        owner: Option<&str>,
        limit: usize,
    ) -> Result<Vec<GhRepo>, GhError> {
        let limit = limit.to_string();
        let mut args = vec!["repo", "list"];
        if let Some(owner) = owner {
            args.push(owner);
        }
        args.extend_from_slice(&["--limit", limit.as_str(), "--json", LIST_FIELDS]);

        let stdout = self.run(&args).await?;
        parse_repo_list(&stdout)
    }

    /// Read the live state of one repository
    pub async fn view_repository(&self, full_name: &str) -> Result<GhRepoDetail, GhError> {
        let stdout = self
            .run(&["repo", "view", full_name, "--json", VIEW_FIELDS])
            .await?;
        parse_repo_detail(&stdout)
    }

    /// Change visibility; `visibility` is `public` or `private`
    pub async fn set_visibility(&self, full_name: &str, visibility: &str) -> Result<(), GhError> {
        self.run(&[
            "repo",
            "edit",
            full_name,
            "--visibility",
            visibility,
            "--accept-visibility-change-consequences",
        ])
        .await
        .map(|_| ())
    }

    pub async fn archive_repository(&self, full_name: &str) -> Result<(), GhError> {
        self.run(&["repo", "archive", full_name, "--yes"])
            .await
            .map(|_| ())
    }

    pub async fn unarchive_repository(&self, full_name: &str) -> Result<(), GhError> {
        self.run(&["repo", "unarchive", full_name, "--yes"])
            .await
            .map(|_| ())
    }
}
