//! [`RemoteClient`] backed by the `gh` command-line client

use super::{RemoteClient, RemoteError};
use crate::config::Settings;
use crate::inventory::{RepositoryDetail, RepositoryRecord, Visibility};
use async_trait::async_trait;
use repovis_gh::GhClient;
use std::time::Duration;

pub struct GhRemote {
    client: GhClient,
    owner: Option<String>,
    limit: usize,
}

impl GhRemote {
    pub fn new(client: GhClient, owner: Option<String>, limit: usize) -> Self {
        Self {
            client,
            owner,
            limit,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let client = GhClient::new(settings.gh_program.clone())
            .with_timeout(Duration::from_secs(settings.timeout_secs));
        Self::new(client, settings.owner.clone(), settings.list_limit)
    }

    pub fn client(&self) -> &GhClient {
        &self.client
    }
}

#[async_trait]
impl RemoteClient for GhRemote {
    async fn list_all(&self) -> Result<Vec<RepositoryRecord>, RemoteError> {
        let repos = self
            .client
            .list_repositories(self.owner.as_deref(), self.limit)
            .await?;
        Ok(repos.into_iter().map(RepositoryRecord::from).collect())
    }

    async fn describe(&self, full_name: &str) -> Result<RepositoryDetail, RemoteError> {
        let detail = self.client.view_repository(full_name).await?;
        Ok(RepositoryDetail::from(detail))
    }

    async fn set_visibility(&self, full_name: &str, target: Visibility) -> Result<(), RemoteError> {
        self.client
            .set_visibility(full_name, target.as_str())
            .await
            .map_err(RemoteError::from)
    }

    async fn set_archived(&self, full_name: &str, archived: bool) -> Result<(), RemoteError> {
        let result = if archived {
            self.client.archive_repository(full_name).await
        } else {
            self.client.unarchive_repository(full_name).await
        };
        result.map_err(RemoteError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_settings_applies_timeout_and_program() {
        let settings = Settings {
            gh_program: "/opt/bin/gh".to_string(),
            timeout_secs: 5,
            owner: Some("octo-org".to_string()),
            list_limit: 50,
            ..Settings::default()
        };

        let remote = GhRemote::from_settings(&settings);
        assert_eq!(remote.client().program(), "/opt/bin/gh");
        assert_eq!(remote.client().timeout(), Duration::from_secs(5));
        assert_eq!(remote.owner.as_deref(), Some("octo-org"));
        assert_eq!(remote.limit, 50);
    }

    #[tokio::test]
    async fn test_missing_program_surfaces_as_remote_error() {
        let remote = GhRemote::new(
            GhClient::new("repovis-no-such-gh"),
            None,
            10,
        );

        let error = remote.list_all().await.unwrap_err();
        assert!(error.status.is_none());
        assert!(error.message.contains("failed to execute"));
    }
}
