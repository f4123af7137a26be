//! Bulk toggle command implementation

use super::list::render_rows;
use super::{Command, Session};
use crate::inventory::RepositoryRecord;
use crate::orchestrator::Action;
use crate::prompt::Prompter;
use crate::selection::{Selection, select_by_keyword};
use anyhow::Result;
use async_trait::async_trait;
use colored::*;

const PICK_FROM_LIST: &str = "Pick from list";
const FILTER_BY_KEYWORD: &str = "Filter by keyword";

/// Toggle visibility or archive status of a chosen set of repositories
pub struct ToggleCommand {
    pub action: Action,
}

impl ToggleCommand {
    pub fn visibility() -> Self {
        Self {
            action: Action::ToggleVisibility,
        }
    }

    pub fn archive() -> Self {
        Self {
            action: Action::ToggleArchive,
        }
    }
}

/// Ask the user which repositories to act on
///
/// Returns `None` when the user backs out. A blank keyword is treated as
/// backing out rather than selecting everything.
pub fn choose_selection(
    prompter: &dyn Prompter,
    inventory: &[RepositoryRecord],
) -> Option<Selection> {
    let modes = vec![PICK_FROM_LIST.to_string(), FILTER_BY_KEYWORD.to_string()];

    match prompter.select("How do you want to select repositories?", &modes)? {
        0 => {
            let picked = prompter.multi_select("Select repositories", &render_rows(inventory))?;
            let indices: Vec<usize> = picked.into_iter().map(|i| i + 1).collect();
            Some(Selection::from_indices(inventory, &indices))
        }
        _ => {
            let keyword = prompter.input("Keyword")?;
            if keyword.trim().is_empty() {
                return None;
            }
            Some(Selection::from_records(&select_by_keyword(inventory, &keyword)))
        }
    }
}

#[async_trait]
impl Command for ToggleCommand {
    async fn execute(&self, session: &mut Session) -> Result<()> {
        let inventory = session.inventory(false).await?;

        let Some(selection) = choose_selection(session.prompter.as_ref(), &inventory) else {
            return Ok(());
        };
        if selection.is_empty() {
            println!("{}", "No repositories selected".yellow());
            return Ok(());
        }

        // Resolve by name so a refetch in between cannot shift the selection
        let current = session.inventory(false).await?;
        let records = selection.resolve(&current);

        let (orchestrator, cache) = session.orchestrator();
        let report = orchestrator.run_batch(&records, self.action, cache).await;
        report.print_summary();

        Ok(())
    }
}
