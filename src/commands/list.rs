//! List command implementation

use super::{Command, Session};
use crate::inventory::RepositoryRecord;
use crate::output::visibility_tag;
use crate::selection::select_by_keyword;
use anyhow::Result;
use async_trait::async_trait;
use colored::*;

/// List command for displaying the inventory, optionally filtered by keyword
pub struct ListCommand {
    /// Output in JSON format
    pub json: bool,
    /// Case-sensitive substring of `owner/name`; blank means no filtering
    pub keyword: Option<String>,
}

impl ListCommand {
    pub fn all() -> Self {
        Self {
            json: false,
            keyword: None,
        }
    }

    pub fn search(keyword: impl Into<String>) -> Self {
        Self {
            json: false,
            keyword: Some(keyword.into()),
        }
    }

    fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref().filter(|k| !k.trim().is_empty())
    }

    /// Records to display, in inventory order
    pub fn filter(&self, inventory: &[RepositoryRecord]) -> Vec<RepositoryRecord> {
        match self.keyword() {
            Some(keyword) => select_by_keyword(inventory, keyword),
            None => inventory.to_vec(),
        }
    }
}

/// Numbered listing lines, as shown in menus and `ls`
pub fn render_rows(records: &[RepositoryRecord]) -> Vec<String> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let mut row = format!(
                "{:>3}. {} [{}]",
                i + 1,
                record.full_name,
                visibility_tag(record.visibility)
            );
            if record.archived {
                row.push_str(&format!(" {}", "archived".dimmed()));
            }
            row
        })
        .collect()
}

#[async_trait]
impl Command for ListCommand {
    async fn execute(&self, session: &mut Session) -> Result<()> {
        let inventory = session.inventory(false).await?;
        let records = self.filter(&inventory);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&records)?);
            return Ok(());
        }

        if records.is_empty() {
            let message = match self.keyword() {
                Some(keyword) => format!("No repositories match '{keyword}'"),
                None => "No repositories found".to_string(),
            };
            println!("{}", message.yellow());
            return Ok(());
        }

        for row in render_rows(&records) {
            println!("{}", row);
        }
        println!();

        let archived = records.iter().filter(|r| r.archived).count();
        println!(
            "{}",
            format!(
                "Total: {} repositories ({} archived)",
                records.len(),
                archived
            )
            .green()
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::Visibility;

    fn inventory() -> Vec<RepositoryRecord> {
        vec![
            RepositoryRecord::new("octo/api", Visibility::Public, false),
            RepositoryRecord::new("octo/web", Visibility::Private, false),
            RepositoryRecord::new("octo/api-docs", Visibility::Public, true),
        ]
    }

    #[test]
    fn test_filter_without_keyword_keeps_everything() {
        assert_eq!(ListCommand::all().filter(&inventory()), inventory());
    }

    #[test]
    fn test_filter_blank_keyword_keeps_everything() {
        assert_eq!(ListCommand::search("  ").filter(&inventory()).len(), 3);
    }

    #[test]
    fn test_filter_by_keyword() {
        let names: Vec<String> = ListCommand::search("api")
            .filter(&inventory())
            .into_iter()
            .map(|r| r.full_name)
            .collect();
        assert_eq!(names, vec!["octo/api", "octo/api-docs"]);
    }

    #[test]
    fn test_render_rows_numbers_from_one() {
        colored::control::set_override(false);
        let rows = render_rows(&inventory());
        assert_eq!(rows[0], "  1. octo/api [public]");
        assert_eq!(rows[2], "  3. octo/api-docs [public] archived");
    }
}
