//! In-process [`RemoteClient`] with scripted failures and a call log

use super::{RemoteClient, RemoteError};
use crate::inventory::{RepositoryDetail, RepositoryRecord, Visibility};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A call received by [`InMemoryRemote`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteCall {
    ListAll,
    Describe(String),
    SetVisibility(String, Visibility),
    SetArchived(String, bool),
}

impl RemoteCall {
    /// Whether the call would change remote state
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            RemoteCall::SetVisibility(..) | RemoteCall::SetArchived(..)
        )
    }
}

/// Platform double that keeps repositories in memory
///
/// Writes follow the platform rule that an archived repository rejects
/// visibility edits.
#[derive(Default)]
pub struct InMemoryRemote {
    repos: Mutex<Vec<RepositoryRecord>>,
    write_failures: Mutex<HashMap<String, RemoteError>>,
    archive_failures: Mutex<HashMap<String, RemoteError>>,
    list_failure: Mutex<Option<RemoteError>>,
    calls: Mutex<Vec<RemoteCall>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl InMemoryRemote {
    pub fn new(repos: Vec<RepositoryRecord>) -> Self {
        Self {
            repos: Mutex::new(repos),
            ..Self::default()
        }
    }

    /// Make every write to `full_name` fail with `error`
    pub fn fail_writes(&self, full_name: &str, error: RemoteError) {
        lock(&self.write_failures).insert(full_name.to_string(), error);
    }

    /// Make only archive and unarchive calls on `full_name` fail with `error`
    pub fn fail_archive_writes(&self, full_name: &str, error: RemoteError) {
        lock(&self.archive_failures).insert(full_name.to_string(), error);
    }

    /// Make the listing call fail with `error`
    pub fn fail_listing(&self, error: RemoteError) {
        *lock(&self.list_failure) = Some(error);
    }

    /// Replace a repository's state behind the engine's back
    pub fn put(&self, record: RepositoryRecord) {
        let mut repos = lock(&self.repos);
        match repos.iter_mut().find(|r| r.full_name == record.full_name) {
            Some(existing) => *existing = record,
            None => repos.push(record),
        }
    }

    pub fn get(&self, full_name: &str) -> Option<RepositoryRecord> {
        lock(&self.repos)
            .iter()
            .find(|r| r.full_name == full_name)
            .cloned()
    }

    pub fn calls(&self) -> Vec<RemoteCall> {
        lock(&self.calls).clone()
    }

    pub fn write_calls(&self) -> Vec<RemoteCall> {
        self.calls().into_iter().filter(RemoteCall::is_write).collect()
    }

    fn record_call(&self, call: RemoteCall) {
        lock(&self.calls).push(call);
    }

    fn not_found(full_name: &str) -> RemoteError {
        RemoteError::with_status(
            404,
            format!(
                "GraphQL: Could not resolve to a Repository with the name '{}'.",
                full_name
            ),
        )
    }

    fn write<F>(&self, full_name: &str, apply: F) -> Result<(), RemoteError>
    where
        F: FnOnce(&mut RepositoryRecord) -> Result<(), RemoteError>,
    {
        if let Some(error) = lock(&self.write_failures).get(full_name) {
            return Err(error.clone());
        }
        let mut repos = lock(&self.repos);
        let record = repos
            .iter_mut()
            .find(|r| r.full_name == full_name)
            .ok_or_else(|| Self::not_found(full_name))?;
        apply(record)
    }
}

#[async_trait]
impl RemoteClient for InMemoryRemote {
    async fn list_all(&self) -> Result<Vec<RepositoryRecord>, RemoteError> {
        self.record_call(RemoteCall::ListAll);
        if let Some(error) = lock(&self.list_failure).clone() {
            return Err(error);
        }
        Ok(lock(&self.repos).clone())
    }

    async fn describe(&self, full_name: &str) -> Result<RepositoryDetail, RemoteError> {
        self.record_call(RemoteCall::Describe(full_name.to_string()));
        self.get(full_name)
            .map(RepositoryDetail::from_record)
            .ok_or_else(|| Self::not_found(full_name))
    }

    async fn set_visibility(&self, full_name: &str, target: Visibility) -> Result<(), RemoteError> {
        self.record_call(RemoteCall::SetVisibility(full_name.to_string(), target));
        self.write(full_name, |record| {
            if record.archived {
                return Err(RemoteError::with_status(
                    403,
                    format!(
                        "repository {} is archived and cannot be edited",
                        record.full_name
                    ),
                ));
            }
            record.visibility = target;
            Ok(())
        })
    }

    async fn set_archived(&self, full_name: &str, archived: bool) -> Result<(), RemoteError> {
        self.record_call(RemoteCall::SetArchived(full_name.to_string(), archived));
        if let Some(error) = lock(&self.archive_failures).get(full_name) {
            return Err(error.clone());
        }
        self.write(full_name, |record| {
            record.archived = archived;
            Ok(())
        })
    }
}
