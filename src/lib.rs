//! Repovis - bulk visibility and archive management for GitHub repositories

pub mod commands;
pub mod config;
pub mod constants;
pub mod errors;
pub mod event_log;
pub mod inventory;
pub mod orchestrator;
pub mod output;
pub mod prompt;
pub mod remote;
pub mod selection;
pub mod snapshot;
pub mod utils;

pub type Result<T> = anyhow::Result<T>;

// Re-export commonly used types
pub use commands::{Command, Session};
pub use config::Settings;
pub use errors::{ErrorKind, FetchError, ValidationError, classify, classify_remote};
pub use inventory::{InventoryCache, RepositoryRecord, Visibility};
pub use orchestrator::{MutationResult, Orchestrator, Report};
pub use remote::{GhRemote, RemoteClient, RemoteError};
