//! Session-owned inventory cache
//!
//! The cache starts [`CacheState::Empty`], becomes `Populated` on the first
//! successful [`InventoryCache::load`], and returns to `Invalidated` whenever
//! live state is known to have changed. Invalidated caches are refetched on
//! the next load.

use super::RepositoryRecord;
use crate::errors::FetchError;
use crate::remote::RemoteClient;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    Empty,
    Populated,
    Invalidated,
}

#[derive(Debug)]
pub struct InventoryCache {
    records: Vec<RepositoryRecord>,
    state: CacheState,
}

impl InventoryCache {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            state: CacheState::Empty,
        }
    }

    pub fn state(&self) -> CacheState {
        self.state
    }

    /// Records currently held, without fetching
    pub fn records(&self) -> &[RepositoryRecord] {
        &self.records
    }

    pub fn get(&self, full_name: &str) -> Option<&RepositoryRecord> {
        self.records.iter().find(|r| r.full_name == full_name)
    }

    /// Return the inventory, fetching it when empty or when `force` is set
    ///
    /// The listing replaces the cache only once it has been fully received
    /// and de-duplicated. A transport failure leaves the previous contents
    /// untouched; an empty listing clears them.
    pub async fn load(
        &mut self,
        client: &dyn RemoteClient,
        force: bool,
    ) -> Result<&[RepositoryRecord], FetchError> {
        if !force && !self.records.is_empty() {
            return Ok(&self.records);
        }

        let listed = client.list_all().await.map_err(FetchError::Transport)?;

        let mut seen = HashSet::new();
        let records: Vec<RepositoryRecord> = listed
            .into_iter()
            .filter(|r| seen.insert(r.full_name.clone()))
            .collect();

        if records.is_empty() {
            self.records.clear();
            self.state = CacheState::Empty;
            return Err(FetchError::Empty);
        }

        self.records = records;
        self.state = CacheState::Populated;
        Ok(&self.records)
    }

    /// Drop all records; the next load refetches
    pub fn invalidate(&mut self) {
        self.records.clear();
        self.state = CacheState::Invalidated;
    }
}

impl Default for InventoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::Visibility;
    use crate::remote::{InMemoryRemote, RemoteCall, RemoteError};

    fn remote() -> InMemoryRemote {
        InMemoryRemote::new(vec![
            RepositoryRecord::new("a/b", Visibility::Public, false),
            RepositoryRecord::new("a/c", Visibility::Private, true),
        ])
    }

    fn list_calls(remote: &InMemoryRemote) -> usize {
        remote
            .calls()
            .iter()
            .filter(|c| **c == RemoteCall::ListAll)
            .count()
    }

    #[tokio::test]
    async fn test_lazy_load_fetches_once() {
        let remote = remote();
        let mut cache = InventoryCache::new();
        assert_eq!(cache.state(), CacheState::Empty);

        assert_eq!(cache.load(&remote, false).await.unwrap().len(), 2);
        assert_eq!(cache.load(&remote, false).await.unwrap().len(), 2);

        assert_eq!(list_calls(&remote), 1);
        assert_eq!(cache.state(), CacheState::Populated);
    }

    #[tokio::test]
    async fn test_force_refetches() {
        let remote = remote();
        let mut cache = InventoryCache::new();
        cache.load(&remote, false).await.unwrap();

        remote.put(RepositoryRecord::new("a/d", Visibility::Public, false));
        let records = cache.load(&remote, true).await.unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(list_calls(&remote), 2);
    }

    #[tokio::test]
    async fn test_invalidate_then_load_repopulates() {
        let remote = remote();
        let mut cache = InventoryCache::new();
        cache.load(&remote, false).await.unwrap();

        cache.invalidate();
        assert_eq!(cache.state(), CacheState::Invalidated);
        assert!(cache.records().is_empty());

        cache.load(&remote, false).await.unwrap();
        assert_eq!(cache.state(), CacheState::Populated);
        assert_eq!(list_calls(&remote), 2);
    }

    #[tokio::test]
    async fn test_empty_listing_is_an_error() {
        let remote = InMemoryRemote::new(Vec::new());
        let mut cache = InventoryCache::new();

        let error = cache.load(&remote, false).await.unwrap_err();
        assert_eq!(error, FetchError::Empty);
        assert_eq!(cache.state(), CacheState::Empty);
    }

    #[tokio::test]
    async fn test_transport_error_keeps_previous_records() {
        let remote = remote();
        let mut cache = InventoryCache::new();
        cache.load(&remote, false).await.unwrap();

        remote.fail_listing(RemoteError::new("HTTP 401: Bad credentials"));
        let error = cache.load(&remote, true).await.unwrap_err();

        assert!(matches!(error, FetchError::Transport(_)));
        assert_eq!(cache.records().len(), 2);
        assert_eq!(cache.state(), CacheState::Populated);
    }

    #[tokio::test]
    async fn test_duplicate_names_collapse_to_first() {
        let remote = InMemoryRemote::new(vec![
            RepositoryRecord::new("a/b", Visibility::Public, false),
            RepositoryRecord::new("a/b", Visibility::Private, true),
        ]);
        let mut cache = InventoryCache::new();

        let records = cache.load(&remote, false).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].visibility, Visibility::Public);
    }
}
