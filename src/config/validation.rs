//! Settings validation

use super::Settings;
use anyhow::anyhow;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    EmptyProgram,
    ZeroListLimit,
    ZeroTimeout,
    InvalidOwner(String),
    EmptyLogFile,
    EmptySnapshotDir,
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::EmptyProgram => write!(f, "gh_program cannot be empty"),
            SettingsError::ZeroListLimit => write!(f, "list_limit must be greater than zero"),
            SettingsError::ZeroTimeout => write!(f, "timeout_secs must be greater than zero"),
            SettingsError::InvalidOwner(owner) => {
                write!(f, "owner '{}' is not a valid user or organization name", owner)
            }
            SettingsError::EmptyLogFile => {
                write!(f, "log_file cannot be empty; use null to disable the log")
            }
            SettingsError::EmptySnapshotDir => write!(f, "snapshot_dir cannot be empty"),
        }
    }
}

impl std::error::Error for SettingsError {}

/// Validate all settings, collecting every problem
pub fn validate_settings(settings: &Settings) -> Result<(), Vec<SettingsError>> {
    let mut errors = Vec::new();

    if settings.gh_program.trim().is_empty() {
        errors.push(SettingsError::EmptyProgram);
    }
    if settings.list_limit == 0 {
        errors.push(SettingsError::ZeroListLimit);
    }
    if settings.timeout_secs == 0 {
        errors.push(SettingsError::ZeroTimeout);
    }
    if let Some(owner) = &settings.owner
        && !is_valid_owner(owner)
    {
        errors.push(SettingsError::InvalidOwner(owner.clone()));
    }
    if settings.log_file.as_deref().is_some_and(|f| f.trim().is_empty()) {
        errors.push(SettingsError::EmptyLogFile);
    }
    if settings.snapshot_dir.trim().is_empty() {
        errors.push(SettingsError::EmptySnapshotDir);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_valid_owner(owner: &str) -> bool {
    !owner.is_empty()
        && owner
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
}

/// Convert a list of settings errors into one anyhow error
pub fn settings_errors_to_anyhow(errors: Vec<SettingsError>) -> anyhow::Error {
    let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
    anyhow!(messages.join("; "))
}
