//! Common test support utilities and fixtures
//!
//! Shared by the integration tests: an inventory fixture, a shareable
//! in-memory platform, a prompter that replays scripted answers, and a
//! temporary workspace for settings, snapshots and the event log.

#![allow(dead_code)]

use async_trait::async_trait;
use repovis::config::Settings;
use repovis::event_log::EventLog;
use repovis::inventory::RepositoryDetail;
use repovis::prompt::Prompter;
use repovis::remote::InMemoryRemote;
use repovis::{RemoteClient, RemoteError, RepositoryRecord, Session, Visibility};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// `a/b` public and active, `a/c` private and archived
pub fn fixture() -> Vec<RepositoryRecord> {
    vec![
        RepositoryRecord::new("a/b", Visibility::Public, false),
        RepositoryRecord::new("a/c", Visibility::Private, true),
    ]
}

/// In-memory platform that the test keeps a handle to after handing it to a session
#[derive(Clone)]
pub struct SharedRemote(pub Arc<InMemoryRemote>);

impl SharedRemote {
    pub fn new(repos: Vec<RepositoryRecord>) -> Self {
        Self(Arc::new(InMemoryRemote::new(repos)))
    }
}

#[async_trait]
impl RemoteClient for SharedRemote {
    async fn list_all(&self) -> Result<Vec<RepositoryRecord>, RemoteError> {
        self.0.list_all().await
    }

    async fn describe(&self, full_name: &str) -> Result<RepositoryDetail, RemoteError> {
        self.0.describe(full_name).await
    }

    async fn set_visibility(&self, full_name: &str, target: Visibility) -> Result<(), RemoteError> {
        self.0.set_visibility(full_name, target).await
    }

    async fn set_archived(&self, full_name: &str, archived: bool) -> Result<(), RemoteError> {
        self.0.set_archived(full_name, archived).await
    }
}

/// One scripted user answer
#[derive(Debug, Clone)]
pub enum Answer {
    Select(Option<usize>),
    MultiSelect(Option<Vec<usize>>),
    Input(Option<String>),
    Confirm(bool),
}

/// Prompter that replays answers in order and records every question
///
/// A question whose next answer has the wrong shape, or that comes after the
/// script ran out, is answered with cancel/no.
#[derive(Clone, Default)]
pub struct ScriptedPrompter {
    answers: Arc<Mutex<VecDeque<Answer>>>,
    asked: Arc<Mutex<Vec<String>>>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: Arc::new(Mutex::new(answers.into_iter().collect())),
            asked: Arc::default(),
        }
    }

    /// Questions asked so far, in order
    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }

    pub fn remaining(&self) -> usize {
        self.answers.lock().unwrap().len()
    }

    fn next(&self, prompt: &str) -> Option<Answer> {
        self.asked.lock().unwrap().push(prompt.to_string());
        self.answers.lock().unwrap().pop_front()
    }
}

impl Prompter for ScriptedPrompter {
    fn select(&self, prompt: &str, _items: &[String]) -> Option<usize> {
        match self.next(prompt) {
            Some(Answer::Select(answer)) => answer,
            _ => None,
        }
    }

    fn multi_select(&self, prompt: &str, _items: &[String]) -> Option<Vec<usize>> {
        match self.next(prompt) {
            Some(Answer::MultiSelect(answer)) => answer,
            _ => None,
        }
    }

    fn input(&self, prompt: &str) -> Option<String> {
        match self.next(prompt) {
            Some(Answer::Input(answer)) => answer,
            _ => None,
        }
    }

    fn confirm(&self, prompt: &str) -> bool {
        matches!(self.next(prompt), Some(Answer::Confirm(true)))
    }
}

/// A test workspace with a temporary directory for snapshots and the event log
pub struct Workspace {
    pub root: TempDir,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

impl Workspace {
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory");
        Self { root }
    }

    pub fn path(&self) -> &Path {
        self.root.path()
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.root.path().join(name)
    }

    pub fn log_path(&self) -> PathBuf {
        self.file("repovis.log")
    }

    /// Settings resolving snapshots and the event log inside the workspace
    pub fn settings(&self) -> Settings {
        Settings {
            snapshot_dir: self.path().to_string_lossy().into_owned(),
            log_file: Some(self.log_path().to_string_lossy().into_owned()),
            ..Settings::default()
        }
    }

    /// Session over `remote` answering with `prompter`
    pub fn session(&self, remote: &SharedRemote, prompter: impl Prompter + 'static) -> Session {
        Session::new(
            self.settings(),
            Box::new(remote.clone()),
            Box::new(prompter),
            EventLog::new(self.log_path()),
        )
    }

    pub fn event_log(&self) -> String {
        std::fs::read_to_string(self.log_path()).unwrap_or_default()
    }
}

/// Result of running a CLI command
#[derive(Debug)]
pub struct CliOutput {
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Run the repovis CLI with given arguments
pub fn run_cli(args: &[&str], cwd: Option<&Path>) -> CliOutput {
    let mut cmd = Command::new("cargo");
    cmd.args(["run", "--quiet", "--manifest-path"]);
    cmd.arg(Path::new(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml"));
    cmd.arg("--");
    cmd.args(args);

    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    let output = cmd.output().expect("Failed to execute cargo run");

    CliOutput {
        status: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}
