//! Snapshot save and apply commands

use super::{Command, Session};
use crate::snapshot;
use crate::utils::validators::validate_snapshot_filename;
use anyhow::Result;
use async_trait::async_trait;
use colored::*;

/// Resolve the snapshot file from the argument, or ask for it
fn snapshot_file(session: &Session, file: Option<&str>, prompt: &str) -> Option<String> {
    match file {
        Some(file) => Some(file.to_string()),
        None => session
            .prompter
            .input(prompt)
            .filter(|name| !name.trim().is_empty())
            .map(|name| name.trim().to_string()),
    }
}

/// Export the current inventory to a snapshot file
pub struct SaveCommand {
    /// File name; asked for interactively when absent
    pub file: Option<String>,
}

#[async_trait]
impl Command for SaveCommand {
    async fn execute(&self, session: &mut Session) -> Result<()> {
        let Some(file) = snapshot_file(session, self.file.as_deref(), "Snapshot file name (*.csv)") else {
            return Ok(());
        };
        let path = session.settings.snapshot_path(&file);
        validate_snapshot_filename(&path)?;

        let inventory = session.inventory(false).await?;
        let written = snapshot::save(&inventory, &path)?;

        session.events.info(
            "snapshot.save",
            format!("path={} count={}", written.display(), inventory.len()),
        );
        println!(
            "{}",
            format!(
                "Saved {} repositories to {}",
                inventory.len(),
                written.display()
            )
            .green()
        );
        Ok(())
    }
}

/// Load a snapshot file and reconcile live state with it
pub struct ApplyCommand {
    /// File name; asked for interactively when absent
    pub file: Option<String>,
}

#[async_trait]
impl Command for ApplyCommand {
    async fn execute(&self, session: &mut Session) -> Result<()> {
        let Some(file) = snapshot_file(session, self.file.as_deref(), "Snapshot file to apply") else {
            return Ok(());
        };
        let path = session.settings.snapshot_path(&file);

        let records = match snapshot::load(&path) {
            Ok(records) => records,
            Err(e) => {
                session.events.error("snapshot.load_failed", &e);
                return Err(e.into());
            }
        };
        session.events.info(
            "snapshot.load",
            format!("path={} count={}", path.display(), records.len()),
        );
        println!(
            "{}",
            format!("Loaded {} records from {}", records.len(), path.display()).green()
        );

        let (orchestrator, cache) = session.orchestrator();
        let report = snapshot::apply(&records, &orchestrator, cache).await;
        report.print_summary();

        Ok(())
    }
}
