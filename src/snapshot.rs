//! Snapshot store
//!
//! A snapshot is a plain text file with one `full_name,visibility,archived`
//! line per repository, for example:
//!
//! ```text
//! octo/hello,public,false
//! octo/legacy,private,true
//! ```
//!
//! There is no header and no quoting. Loading accepts a file as long as at
//! least one line is well formed; malformed lines are ignored. Applying a
//! snapshot reconciles each record independently against live state.

use crate::constants::snapshot::DELIMITER;
use crate::errors::ValidationError;
use crate::inventory::{InventoryCache, RepositoryRecord, Visibility};
use crate::orchestrator::{Orchestrator, Outcome, Report, SkipReason};
use crate::utils::validators::{is_snapshot_line, validate_full_name, validate_snapshot_filename};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Desired state of one repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotRecord {
    pub full_name: String,
    pub visibility: Visibility,
    pub archived: bool,
}

impl SnapshotRecord {
    pub fn to_line(&self) -> String {
        format!(
            "{}{}{}{}{}",
            self.full_name, DELIMITER, self.visibility, DELIMITER, self.archived
        )
    }

    /// Parse a line already known to match the snapshot line pattern
    fn parse_line(line: &str) -> Option<Self> {
        let mut fields = line.split(DELIMITER);
        let full_name = fields.next()?;
        let visibility = fields.next()?.parse().ok()?;
        let archived = fields.next()?.parse().ok()?;
        Some(Self {
            full_name: full_name.to_string(),
            visibility,
            archived,
        })
    }

    fn as_record(&self) -> RepositoryRecord {
        RepositoryRecord::new(self.full_name.clone(), self.visibility, self.archived)
    }
}

impl From<&RepositoryRecord> for SnapshotRecord {
    fn from(record: &RepositoryRecord) -> Self {
        Self {
            full_name: record.full_name.clone(),
            visibility: record.visibility,
            archived: record.archived,
        }
    }
}

/// Write `inventory` to `path`, one line per repository
///
/// The file name must match the snapshot name pattern; nothing is written
/// otherwise.
pub fn save(inventory: &[RepositoryRecord], path: &Path) -> Result<PathBuf> {
    validate_snapshot_filename(path)?;
    if inventory.is_empty() {
        anyhow::bail!("Nothing to save: the inventory is empty");
    }

    let mut content = String::new();
    for record in inventory {
        content.push_str(&SnapshotRecord::from(record).to_line());
        content.push('\n');
    }

    fs::write(path, content)
        .with_context(|| format!("Failed to write snapshot {}", path.display()))?;
    Ok(path.to_path_buf())
}

/// Read the well-formed records of a snapshot file, in file order
///
/// The file name follows the same rule as [`save`]. Fails with
/// [`ValidationError::BadFileFormat`] when the file is missing, unreadable,
/// or has no well-formed line at all.
pub fn load(path: &Path) -> Result<Vec<SnapshotRecord>, ValidationError> {
    validate_snapshot_filename(path)?;
    if !path.is_file() {
        return Err(ValidationError::BadFileFormat(format!(
            "{} does not exist",
            path.display()
        )));
    }

    let content = fs::read_to_string(path).map_err(|e| {
        ValidationError::BadFileFormat(format!("cannot read {}: {}", path.display(), e))
    })?;

    let records: Vec<SnapshotRecord> = content
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| is_snapshot_line(line))
        .filter_map(SnapshotRecord::parse_line)
        .collect();

    if records.is_empty() {
        return Err(ValidationError::BadFileFormat(format!(
            "{} has no line of the form owner/name,public|private,true|false",
            path.display()
        )));
    }

    Ok(records)
}

/// Reconcile live state with `records`, one record at a time
///
/// Each record is confirmed once, then visibility and archive state are set
/// as two independent steps. Records with a malformed name are skipped
/// without asking. The cache is invalidated afterwards.
pub async fn apply(
    records: &[SnapshotRecord],
    orchestrator: &Orchestrator<'_>,
    cache: &mut InventoryCache,
) -> Report {
    let mut report = Report::new();

    for record in records {
        if validate_full_name(&record.full_name).is_err() {
            let outcome = Outcome::record(&record.full_name, SkipReason::BadRepoName);
            orchestrator.report(&outcome);
            report.push(outcome);
            continue;
        }

        let prompt = format!(
            "Set {} to {} and {}?",
            record.full_name,
            record.visibility,
            if record.archived { "archived" } else { "unarchived" }
        );
        if !orchestrator.prompter().confirm(&prompt) {
            let outcome = Outcome::record(&record.full_name, SkipReason::Declined);
            orchestrator.report(&outcome);
            report.push(outcome);
            continue;
        }

        let target = record.as_record();
        report.push(orchestrator.set_visibility_to(&target, record.visibility).await);
        report.push(orchestrator.set_archived_to(&target, record.archived).await);
    }

    orchestrator
        .events()
        .info("snapshot.apply", format!("{} records: {}", records.len(), report.summary()));
    cache.invalidate();
    report
}
