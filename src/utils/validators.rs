//! Snapshot input validation
//!
//! Each check runs before any remote call so that rejected input has no
//! side effects.

use crate::constants::snapshot::{FILENAME_PATTERN, FULL_NAME_PATTERN, LINE_PATTERN};
use crate::errors::ValidationError;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static FILENAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(FILENAME_PATTERN).expect("snapshot filename pattern is valid"));

static LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(LINE_PATTERN).expect("snapshot line pattern is valid"));

static FULL_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(FULL_NAME_PATTERN).expect("full name pattern is valid"));

/// Check the final component of a snapshot path
///
/// Only the file name is constrained; the directory part is up to the caller.
pub fn validate_snapshot_filename(path: &Path) -> Result<(), ValidationError> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();

    if FILENAME_RE.is_match(name) {
        Ok(())
    } else {
        Err(ValidationError::BadFilename(path.display().to_string()))
    }
}

/// Whether `line` is a well-formed `full_name,visibility,archived` record
pub fn is_snapshot_line(line: &str) -> bool {
    LINE_RE.is_match(line)
}

/// Check an `owner/name` repository identifier
pub fn validate_full_name(full_name: &str) -> Result<(), ValidationError> {
    if FULL_NAME_RE.is_match(full_name) {
        Ok(())
    } else {
        Err(ValidationError::BadRepoName(full_name.to_string()))
    }
}
