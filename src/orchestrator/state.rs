//! Per-repository mutation state machine
//!
//! ```text
//! Pending -> ConfirmPrompted -> Executing -> Done(Success | Failed | Skipped)
//!        \                  \-> Done(Skipped: declined)
//!         \-> Done(Skipped: archived)
//! ```
//!
//! Toggle actions always pass through `ConfirmPrompted`. Explicit set actions
//! (snapshot reconciliation) go from `Pending` straight to `Executing` because
//! the caller has already confirmed the whole record. A snapshot record that
//! is skipped as a whole never enters the machine; see [`Outcome::record`].

use crate::errors::{ErrorKind, classify_remote};
use crate::inventory::{RepositoryRecord, Visibility};
use crate::prompt::Prompter;
use crate::remote::RemoteClient;
use std::fmt;

/// What to do to a repository
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ToggleVisibility,
    ToggleArchive,
    SetVisibility(Visibility),
    SetArchived(bool),
}

impl Action {
    fn needs_confirmation(self) -> bool {
        matches!(self, Action::ToggleVisibility | Action::ToggleArchive)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::ToggleVisibility => write!(f, "toggle visibility"),
            Action::ToggleArchive => write!(f, "toggle archive"),
            Action::SetVisibility(target) => write!(f, "set visibility {}", target),
            Action::SetArchived(true) => write!(f, "archive"),
            Action::SetArchived(false) => write!(f, "unarchive"),
        }
    }
}

/// What an [`Outcome`] is about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// One action run by a [`Mutation`]
    Action(Action),
    /// A whole snapshot record, settled before any property was touched
    Record,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Action(action) => write!(f, "{}", action),
            Scope::Record => write!(f, "reconcile"),
        }
    }
}

/// State reached by a successful mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewState {
    Visibility(Visibility),
    Archived(bool),
}

impl fmt::Display for NewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NewState::Visibility(v) => write!(f, "{}", v),
            NewState::Archived(true) => write!(f, "archived"),
            NewState::Archived(false) => write!(f, "unarchived"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Visibility of an archived repository cannot change
    Archived,
    /// The user answered no
    Declined,
    /// Live state already matches the target
    AlreadyInState(NewState),
    /// Identifier is not `owner/name`
    BadRepoName,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Archived => write!(f, "archived"),
            SkipReason::Declined => write!(f, "declined"),
            SkipReason::AlreadyInState(state) => write!(f, "already {}", state),
            SkipReason::BadRepoName => write!(f, "invalid repository name"),
        }
    }
}

/// Terminal result of one mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationResult {
    Success(NewState),
    Skipped(SkipReason),
    Failed(ErrorKind, String),
}

impl MutationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, MutationResult::Success(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationState {
    Pending,
    ConfirmPrompted,
    Executing,
    Done(MutationResult),
}

/// Result of one action, or of one snapshot record, on one repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub full_name: String,
    pub scope: Scope,
    pub result: MutationResult,
}

impl Outcome {
    pub fn new(full_name: impl Into<String>, action: Action, result: MutationResult) -> Self {
        Self {
            full_name: full_name.into(),
            scope: Scope::Action(action),
            result,
        }
    }

    /// Outcome for a snapshot record skipped as a whole
    pub fn record(full_name: impl Into<String>, reason: SkipReason) -> Self {
        Self {
            full_name: full_name.into(),
            scope: Scope::Record,
            result: MutationResult::Skipped(reason),
        }
    }
}

/// One action on one repository, advanced a transition at a time
#[derive(Debug)]
pub struct Mutation {
    record: RepositoryRecord,
    action: Action,
    state: MutationState,
}

impl Mutation {
    /// `record` is the cached state the user selected
    pub fn new(record: RepositoryRecord, action: Action) -> Self {
        Self {
            record,
            action,
            state: MutationState::Pending,
        }
    }

    pub fn state(&self) -> &MutationState {
        &self.state
    }

    pub fn is_done(&self) -> bool {
        matches!(self.state, MutationState::Done(_))
    }

    /// Question asked in `ConfirmPrompted`
    pub fn confirm_prompt(&self) -> String {
        let name = &self.record.full_name;
        match self.action {
            Action::ToggleVisibility => format!(
                "Change {} from {} to {}?",
                name,
                self.record.visibility,
                self.record.visibility.toggled()
            ),
            Action::ToggleArchive if self.record.archived => format!("Unarchive {}?", name),
            Action::ToggleArchive => format!("Archive {}?", name),
            other => format!("{} {}?", other, name),
        }
    }

    /// Perform a single transition
    pub async fn step(&mut self, client: &dyn RemoteClient, prompter: &dyn Prompter) {
        let next = match &self.state {
            MutationState::Pending => {
                if self.action == Action::ToggleVisibility && self.record.archived {
                    MutationState::Done(MutationResult::Skipped(SkipReason::Archived))
                } else if self.action.needs_confirmation() {
                    MutationState::ConfirmPrompted
                } else {
                    MutationState::Executing
                }
            }
            MutationState::ConfirmPrompted => {
                if prompter.confirm(&self.confirm_prompt()) {
                    MutationState::Executing
                } else {
                    MutationState::Done(MutationResult::Skipped(SkipReason::Declined))
                }
            }
            MutationState::Executing => MutationState::Done(self.execute(client).await),
            MutationState::Done(_) => return,
        };
        self.state = next;
    }

    /// Drive the mutation to a terminal state
    pub async fn run(mut self, client: &dyn RemoteClient, prompter: &dyn Prompter) -> Outcome {
        loop {
            if let MutationState::Done(result) = self.state {
                return Outcome::new(self.record.full_name, self.action, result);
            }
            self.step(client, prompter).await;
        }
    }

    /// Re-read live state, then write the complement or the explicit target
    async fn execute(&self, client: &dyn RemoteClient) -> MutationResult {
        let name = self.record.full_name.as_str();

        let live = match client.describe(name).await {
            Ok(detail) => detail.record,
            Err(e) => return MutationResult::Failed(classify_remote(&e), e.message),
        };

        match self.action {
            Action::ToggleVisibility => {
                if live.archived {
                    return MutationResult::Skipped(SkipReason::Archived);
                }
                write_visibility(client, name, live.visibility.toggled()).await
            }
            Action::SetVisibility(target) => {
                if live.visibility == target {
                    MutationResult::Skipped(SkipReason::AlreadyInState(NewState::Visibility(
                        target,
                    )))
                } else if live.archived {
                    MutationResult::Skipped(SkipReason::Archived)
                } else {
                    write_visibility(client, name, target).await
                }
            }
            Action::ToggleArchive => write_archived(client, name, !live.archived).await,
            Action::SetArchived(target) => {
                if live.archived == target {
                    MutationResult::Skipped(SkipReason::AlreadyInState(NewState::Archived(target)))
                } else {
                    write_archived(client, name, target).await
                }
            }
        }
    }
}

async fn write_visibility(
    client: &dyn RemoteClient,
    name: &str,
    target: Visibility,
) -> MutationResult {
    match client.set_visibility(name, target).await {
        Ok(()) => MutationResult::Success(NewState::Visibility(target)),
        Err(e) => MutationResult::Failed(classify_remote(&e), e.message),
    }
}

async fn write_archived(client: &dyn RemoteClient, name: &str, target: bool) -> MutationResult {
    match client.set_archived(name, target).await {
        Ok(()) => MutationResult::Success(NewState::Archived(target)),
        Err(e) => MutationResult::Failed(classify_remote(&e), e.message),
    }
}
