//! Aggregated batch results

use super::state::{MutationResult, Outcome};
use crate::errors::ErrorKind;
use colored::*;

/// Ordered list of terminal outcomes for one batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    outcomes: Vec<Outcome>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, outcome: Outcome) {
        self.outcomes.push(outcome);
    }

    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn succeeded(&self) -> usize {
        self.count(|r| matches!(r, MutationResult::Success(_)))
    }

    pub fn skipped(&self) -> usize {
        self.count(|r| matches!(r, MutationResult::Skipped(_)))
    }

    pub fn failed(&self) -> usize {
        self.count(|r| matches!(r, MutationResult::Failed(..)))
    }

    pub fn has_success(&self) -> bool {
        self.succeeded() > 0
    }

    /// Names of repositories with at least one failed action, first-seen order
    pub fn failed_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for outcome in &self.outcomes {
            if matches!(outcome.result, MutationResult::Failed(..))
                && !names.contains(&outcome.full_name.as_str())
            {
                names.push(&outcome.full_name);
            }
        }
        names
    }

    /// `(name, kind, raw message)` for every failed action
    pub fn failures(&self) -> Vec<(&str, &ErrorKind, &str)> {
        self.outcomes
            .iter()
            .filter_map(|o| match &o.result {
                MutationResult::Failed(kind, raw) => Some((o.full_name.as_str(), kind, raw.as_str())),
                _ => None,
            })
            .collect()
    }

    fn count(&self, predicate: impl Fn(&MutationResult) -> bool) -> usize {
        self.outcomes.iter().filter(|o| predicate(&o.result)).count()
    }

    /// One-line summary, e.g. `2 succeeded, 1 skipped, 0 failed`
    pub fn summary(&self) -> String {
        format!(
            "{} succeeded, {} skipped, {} failed",
            self.succeeded(),
            self.skipped(),
            self.failed()
        )
    }

    pub fn print_summary(&self) {
        if self.is_empty() {
            println!("{}", "Nothing was processed".yellow());
            return;
        }

        println!();
        if self.failed() == 0 {
            println!("{}", format!("Done: {}", self.summary()).green());
            return;
        }

        println!("{}", format!("Completed with {}", self.summary()).yellow());
        for (name, kind, raw) in self.failures() {
            eprintln!(
                "  {} {}: {} ({})",
                "✗".red(),
                name.bold(),
                kind.to_string().red(),
                kind.hint()
            );
            if matches!(kind, ErrorKind::Unknown(_)) {
                eprintln!("    {}", raw.dimmed());
            }
        }
    }
}
