//! Settings file loading

use super::validation;
use crate::constants::config::{
    DEFAULT_LIST_LIMIT, DEFAULT_LOG_FILE, DEFAULT_SNAPSHOT_DIR, DEFAULT_TIMEOUT_SECS,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_gh_program() -> String {
    repovis_gh::DEFAULT_PROGRAM.to_string()
}

fn default_list_limit() -> usize {
    DEFAULT_LIST_LIMIT
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_log_file() -> Option<String> {
    Some(DEFAULT_LOG_FILE.to_string())
}

fn default_snapshot_dir() -> String {
    DEFAULT_SNAPSHOT_DIR.to_string()
}

fn default_color() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// `gh` executable name or path
    #[serde(default = "default_gh_program")]
    pub gh_program: String,

    /// User or organization whose repositories are listed; the
    /// authenticated user when unset
    #[serde(default)]
    pub owner: Option<String>,

    #[serde(default = "default_list_limit")]
    pub list_limit: usize,

    /// Upper bound for each `gh` call
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Event log path; `null` disables the log
    #[serde(default = "default_log_file")]
    pub log_file: Option<String>,

    /// Directory that relative snapshot file names resolve against
    #[serde(default = "default_snapshot_dir")]
    pub snapshot_dir: String,

    #[serde(default = "default_color")]
    pub color: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gh_program: default_gh_program(),
            owner: None,
            list_limit: default_list_limit(),
            timeout_secs: default_timeout_secs(),
            log_file: default_log_file(),
            snapshot_dir: default_snapshot_dir(),
            color: default_color(),
        }
    }
}

impl Settings {
    /// Load settings from `path`, falling back to defaults when it does not exist
    pub fn load(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path))?;
        Self::from_yaml(&content).with_context(|| format!("Invalid settings file {}", path))
    }

    /// Parse and validate settings from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty document means "all defaults"
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let settings: Settings = serde_yaml::from_str(content)?;
        validation::validate_settings(&settings)
            .map_err(validation::settings_errors_to_anyhow)?;
        Ok(settings)
    }

    /// Resolve a snapshot file name against `snapshot_dir`
    pub fn snapshot_path(&self, file: &str) -> PathBuf {
        let path = Path::new(file);
        if path.is_absolute() || path.parent().is_some_and(|p| !p.as_os_str().is_empty()) {
            path.to_path_buf()
        } else {
            Path::new(&self.snapshot_dir).join(path)
        }
    }
}
