//! Error taxonomy and failure classification
//!
//! - [`FetchError`]: the bulk listing failed; aborts the current action only
//! - [`ErrorKind`]: why a single repository mutation failed; never aborts a batch
//! - [`ValidationError`]: rejected input, raised before any remote call

use crate::remote::RemoteError;
use std::fmt;

/// Failure to populate the inventory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The platform returned zero repositories
    Empty,
    /// The listing call itself failed (auth, network, rate limit)
    Transport(RemoteError),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Empty => write!(f, "No repositories found"),
            FetchError::Transport(error) => write!(f, "Failed to list repositories: {}", error),
        }
    }
}

impl std::error::Error for FetchError {}

/// Classified cause of a failed mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    RateLimited,
    NotFound,
    ArchivedConflict,
    PermissionDenied,
    /// Unrecognised failure; carries the raw message
    Unknown(String),
}

impl ErrorKind {
    /// Short hint on what the user can do about it
    pub fn hint(&self) -> &'static str {
        match self {
            ErrorKind::RateLimited => "retry later",
            ErrorKind::NotFound => "check the repository name",
            ErrorKind::ArchivedConflict => "unarchive the repository first",
            ErrorKind::PermissionDenied => "check token scopes and repository permissions",
            ErrorKind::Unknown(_) => "see the event log for details",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::RateLimited => write!(f, "rate limited"),
            ErrorKind::NotFound => write!(f, "not found"),
            ErrorKind::ArchivedConflict => write!(f, "archived repository cannot be edited"),
            ErrorKind::PermissionDenied => write!(f, "permission denied"),
            ErrorKind::Unknown(_) => write!(f, "unknown error"),
        }
    }
}

/// Input rejected before any side effect
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Snapshot file name does not match the allowed pattern
    BadFilename(String),
    /// Snapshot file missing, unreadable, or without a single valid line
    BadFileFormat(String),
    /// Repository identifier is not `owner/name`
    BadRepoName(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::BadFilename(name) => write!(
                f,
                "Invalid snapshot file name '{}': use letters, digits, '_', '.', '-' and a .csv extension",
                name
            ),
            ValidationError::BadFileFormat(reason) => {
                write!(f, "Invalid snapshot file: {}", reason)
            }
            ValidationError::BadRepoName(name) => {
                write!(f, "Invalid repository name '{}': expected owner/name", name)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Classify a raw failure message
///
/// Patterns are checked in order and the first match wins. Matching
/// ignores case.
pub fn classify(raw: &str) -> ErrorKind {
    let text = raw.to_lowercase();

    if text.contains("rate limit") {
        ErrorKind::RateLimited
    } else if text.contains("could not resolve") || text.contains("not found") {
        ErrorKind::NotFound
    } else if text.contains("archived") && text.contains("cannot be edited") {
        ErrorKind::ArchivedConflict
    } else if text.contains("not accessible") || text.contains("permission") {
        ErrorKind::PermissionDenied
    } else {
        ErrorKind::Unknown(raw.to_string())
    }
}

/// Classify a remote failure, preferring its HTTP status when present
pub fn classify_remote(error: &RemoteError) -> ErrorKind {
    match error.status {
        Some(429) => ErrorKind::RateLimited,
        Some(404) => ErrorKind::NotFound,
        Some(403) => match classify(&error.message) {
            kind @ (ErrorKind::RateLimited | ErrorKind::ArchivedConflict) => kind,
            _ => ErrorKind::PermissionDenied,
        },
        _ => classify(&error.message),
    }
}
