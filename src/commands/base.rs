//! Base types and traits for the command pattern

use crate::config::Settings;
use crate::errors::FetchError;
use crate::event_log::EventLog;
use crate::inventory::{InventoryCache, RepositoryRecord};
use crate::orchestrator::Orchestrator;
use crate::prompt::Prompter;
use crate::remote::RemoteClient;
use anyhow::Result;

/// State shared by every command for the lifetime of one run
///
/// The session owns the inventory cache; commands borrow it mutably between
/// user actions and never hold it across two actions.
pub struct Session {
    /// The loaded settings
    pub settings: Settings,
    /// Repository inventory, fetched on first demand
    pub cache: InventoryCache,
    /// Platform access
    pub remote: Box<dyn RemoteClient>,
    /// Menu and confirmation renderer
    pub prompter: Box<dyn Prompter>,
    /// Append-only event log
    pub events: EventLog,
}

impl Session {
    pub fn new(
        settings: Settings,
        remote: Box<dyn RemoteClient>,
        prompter: Box<dyn Prompter>,
        events: EventLog,
    ) -> Self {
        Self {
            settings,
            cache: InventoryCache::new(),
            remote,
            prompter,
            events,
        }
    }

    /// Current inventory, fetching it when the cache is empty or `force` is set
    pub async fn inventory(&mut self, force: bool) -> Result<Vec<RepositoryRecord>> {
        let fetching = force || self.cache.records().is_empty();

        match self.cache.load(self.remote.as_ref(), force).await {
            Ok(records) => {
                if fetching {
                    self.events
                        .info("inventory.fetch", format!("count={}", records.len()));
                }
                Ok(records.to_vec())
            }
            Err(e) => {
                match &e {
                    FetchError::Empty => self.events.warn("inventory.empty", &e),
                    FetchError::Transport(_) => self.events.error("inventory.fetch_failed", &e),
                }
                Err(e.into())
            }
        }
    }

    /// Orchestrator over this session's collaborators, plus the cache it invalidates
    pub fn orchestrator(&mut self) -> (Orchestrator<'_>, &mut InventoryCache) {
        let orchestrator =
            Orchestrator::new(self.remote.as_ref(), self.prompter.as_ref(), &self.events);
        (orchestrator, &mut self.cache)
    }
}

/// Trait that all commands must implement
#[async_trait::async_trait]
pub trait Command {
    /// Execute the command against the session
    async fn execute(&self, session: &mut Session) -> Result<()>;
}
