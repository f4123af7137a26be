//! Remote repository client abstraction
//!
//! The engine talks to the hosting platform only through [`RemoteClient`].
//! Two implementations exist:
//!
//! - [`GhRemote`]: shells out to the `gh` command-line client
//! - [`InMemoryRemote`]: deterministic in-process platform used by tests

pub mod gh;
pub mod memory;

pub use gh::GhRemote;
pub use memory::{InMemoryRemote, RemoteCall};

use crate::inventory::{RepositoryDetail, RepositoryRecord, Visibility};
use async_trait::async_trait;
use std::fmt;

/// Failure returned by a remote call
///
/// `status` is the HTTP status code when the client exposed one;
/// `message` is the raw failure text used for classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteError {
    pub status: Option<u16>,
    pub message: String,
}

impl RemoteError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    pub fn with_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} (HTTP {})", self.message, status),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for RemoteError {}

impl From<repovis_gh::GhError> for RemoteError {
    fn from(error: repovis_gh::GhError) -> Self {
        Self {
            status: error.status,
            message: error.message,
        }
    }
}

/// Read and write operations against repositories identified by `owner/name`
#[async_trait]
pub trait RemoteClient: Send + Sync {
    /// List every repository visible to the owner
    async fn list_all(&self) -> Result<Vec<RepositoryRecord>, RemoteError>;

    /// Read the live state of one repository
    async fn describe(&self, full_name: &str) -> Result<RepositoryDetail, RemoteError>;

    async fn set_visibility(&self, full_name: &str, target: Visibility) -> Result<(), RemoteError>;

    async fn set_archived(&self, full_name: &str, archived: bool) -> Result<(), RemoteError>;
}
