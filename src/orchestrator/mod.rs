//! Mutation orchestration
//!
//! Drives actions over a selection strictly in order: one repository is
//! confirmed, executed and classified before the next one starts. Failures
//! are recorded and never stop the batch. A batch with at least one success
//! invalidates the inventory cache.

pub mod report;
pub mod state;

pub use report::Report;
pub use state::{
    Action, Mutation, MutationResult, MutationState, NewState, Outcome, Scope, SkipReason,
};

use crate::event_log::EventLog;
use crate::inventory::{InventoryCache, RepositoryRecord, Visibility};
use crate::output::Logger;
use crate::prompt::Prompter;
use crate::remote::RemoteClient;

pub struct Orchestrator<'a> {
    client: &'a dyn RemoteClient,
    prompter: &'a dyn Prompter,
    events: &'a EventLog,
    logger: Logger,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        client: &'a dyn RemoteClient,
        prompter: &'a dyn Prompter,
        events: &'a EventLog,
    ) -> Self {
        Self {
            client,
            prompter,
            events,
            logger: Logger,
        }
    }

    pub async fn toggle_visibility(
        &self,
        records: &[RepositoryRecord],
        cache: &mut InventoryCache,
    ) -> Report {
        self.run_batch(records, Action::ToggleVisibility, cache).await
    }

    pub async fn toggle_archive(
        &self,
        records: &[RepositoryRecord],
        cache: &mut InventoryCache,
    ) -> Report {
        self.run_batch(records, Action::ToggleArchive, cache).await
    }

    /// Apply `action` to every record in order
    pub async fn run_batch(
        &self,
        records: &[RepositoryRecord],
        action: Action,
        cache: &mut InventoryCache,
    ) -> Report {
        let mut report = Report::new();
        for record in records {
            report.push(self.run(record.clone(), action).await);
        }

        self.events.info("batch.done", format!("{}: {}", action, report.summary()));
        if report.has_success() {
            cache.invalidate();
            self.events.info("cache.invalidate", "after successful mutation");
        }
        report
    }

    /// Explicit target used by snapshot reconciliation; no confirmation
    pub async fn set_visibility_to(&self, record: &RepositoryRecord, target: Visibility) -> Outcome {
        self.run(record.clone(), Action::SetVisibility(target)).await
    }

    /// Explicit target used by snapshot reconciliation; no confirmation
    pub async fn set_archived_to(&self, record: &RepositoryRecord, target: bool) -> Outcome {
        self.run(record.clone(), Action::SetArchived(target)).await
    }

    pub fn prompter(&self) -> &dyn Prompter {
        self.prompter
    }

    pub fn events(&self) -> &EventLog {
        self.events
    }

    /// Run one mutation to completion and report its outcome
    pub async fn run(&self, record: RepositoryRecord, action: Action) -> Outcome {
        self.events
            .info("mutation.attempt", format!("{} {}", record.full_name, action));

        let outcome = Mutation::new(record, action)
            .run(self.client, self.prompter)
            .await;
        self.report(&outcome);
        outcome
    }

    /// Console and event-log line for one outcome
    pub fn report(&self, outcome: &Outcome) {
        let name = outcome.full_name.as_str();
        match &outcome.result {
            MutationResult::Success(state) => {
                self.logger.success(name, &format!("{}: now {}", outcome.scope, state));
                self.events
                    .info("mutation.success", format!("{} {} -> {}", name, outcome.scope, state));
            }
            MutationResult::Skipped(reason) => {
                self.logger
                    .warn(name, &format!("{}: skipped ({})", outcome.scope, reason));
                self.events
                    .info("mutation.skipped", format!("{} {} ({})", name, outcome.scope, reason));
            }
            MutationResult::Failed(kind, raw) => {
                self.logger
                    .error(name, &format!("{}: failed, {} ({})", outcome.scope, kind, kind.hint()));
                self.events.error(
                    "mutation.failed",
                    format!("{} {} kind={} raw={:?}", name, outcome.scope, kind, raw),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::inventory::CacheState;
    use crate::prompt::AssumeAnswer;
    use crate::remote::{InMemoryRemote, RemoteCall, RemoteError};

    fn inventory() -> Vec<RepositoryRecord> {
        vec![
            RepositoryRecord::new("a/b", Visibility::Public, false),
            RepositoryRecord::new("a/c", Visibility::Private, true),
        ]
    }

    async fn loaded_cache(remote: &InMemoryRemote) -> InventoryCache {
        let mut cache = InventoryCache::new();
        cache.load(remote, false).await.unwrap();
        cache
    }

    #[tokio::test]
    async fn test_visibility_batch_end_to_end() {
        let remote = InMemoryRemote::new(inventory());
        let events = EventLog::disabled();
        let yes = AssumeAnswer(true);
        let mut cache = loaded_cache(&remote).await;
        let orchestrator = Orchestrator::new(&remote, &yes, &events);

        let selected = cache.records().to_vec();
        let report = orchestrator.toggle_visibility(&selected, &mut cache).await;

        assert_eq!(
            report.outcomes()[0].result,
            MutationResult::Success(NewState::Visibility(Visibility::Private))
        );
        assert_eq!(
            report.outcomes()[1].result,
            MutationResult::Skipped(SkipReason::Archived)
        );
        assert_eq!(cache.state(), CacheState::Invalidated);

        // a/c never reached the remote
        assert!(
            !remote
                .calls()
                .iter()
                .any(|c| matches!(c, RemoteCall::Describe(n) if n == "a/c"))
        );
    }

    #[tokio::test]
    async fn test_batch_without_success_keeps_cache() {
        let remote = InMemoryRemote::new(inventory());
        let events = EventLog::disabled();
        let no = AssumeAnswer(false);
        let mut cache = loaded_cache(&remote).await;
        let orchestrator = Orchestrator::new(&remote, &no, &events);

        let selected = cache.records().to_vec();
        let report = orchestrator.toggle_archive(&selected, &mut cache).await;

        assert_eq!(report.skipped(), 2);
        assert_eq!(cache.state(), CacheState::Populated);
        assert!(remote.write_calls().is_empty());
    }

    #[tokio::test]
    async fn test_failures_do_not_abort_batch() {
        let remote = InMemoryRemote::new(vec![
            RepositoryRecord::new("a/x", Visibility::Public, false),
            RepositoryRecord::new("a/y", Visibility::Public, false),
        ]);
        remote.fail_writes("a/x", RemoteError::with_status(403, "Resource not accessible"));
        let events = EventLog::disabled();
        let yes = AssumeAnswer(true);
        let mut cache = loaded_cache(&remote).await;
        let orchestrator = Orchestrator::new(&remote, &yes, &events);

        let selected = cache.records().to_vec();
        let report = orchestrator.toggle_archive(&selected, &mut cache).await;

        assert_eq!(report.failed(), 1);
        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.failed_names(), vec!["a/x"]);
        assert_eq!(report.failures()[0].1, &ErrorKind::PermissionDenied);
        assert!(remote.get("a/y").unwrap().archived);
    }

    #[tokio::test]
    async fn test_toggling_visibility_twice_restores_original() {
        let remote = InMemoryRemote::new(inventory());
        let events = EventLog::disabled();
        let yes = AssumeAnswer(true);
        let mut cache = InventoryCache::new();
        let orchestrator = Orchestrator::new(&remote, &yes, &events);

        for _ in 0..2 {
            let records = cache.load(&remote, false).await.unwrap().to_vec();
            let report = orchestrator
                .toggle_visibility(&records[..1], &mut cache)
                .await;
            assert_eq!(report.succeeded(), 1);
        }

        assert_eq!(remote.get("a/b").unwrap().visibility, Visibility::Public);
    }
}
