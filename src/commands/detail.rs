//! Single repository detail command

use super::list::render_rows;
use super::{Command, Session};
use crate::errors::classify_remote;
use crate::output::visibility_tag;
use anyhow::Result;
use async_trait::async_trait;
use colored::*;

/// Show the live state of one repository
pub struct DetailCommand {
    /// `owner/name`; picked from the inventory when absent
    pub full_name: Option<String>,
}

#[async_trait]
impl Command for DetailCommand {
    async fn execute(&self, session: &mut Session) -> Result<()> {
        let full_name = match &self.full_name {
            Some(name) => name.clone(),
            None => {
                let inventory = session.inventory(false).await?;
                let Some(index) = session
                    .prompter
                    .select("Select a repository", &render_rows(&inventory))
                else {
                    return Ok(());
                };
                match inventory.get(index) {
                    Some(record) => record.full_name.clone(),
                    None => return Ok(()),
                }
            }
        };

        let detail = match session.remote.describe(&full_name).await {
            Ok(detail) => detail,
            Err(e) => {
                let kind = classify_remote(&e);
                session
                    .events
                    .error("repository.describe_failed", format!("{} kind={}", full_name, kind));
                anyhow::bail!("Cannot read {}: {} ({})", full_name, kind, kind.hint());
            }
        };

        let record = &detail.record;
        println!("{}", record.full_name.cyan().bold());
        println!("  Visibility: {}", visibility_tag(record.visibility));
        println!(
            "  Archived:   {}",
            if record.archived { "yes".yellow() } else { "no".normal() }
        );
        if let Some(description) = &detail.description {
            println!("  About:      {}", description);
        }
        if let Some(url) = &detail.url {
            println!("  URL:        {}", url);
        }
        if let Some(branch) = &detail.default_branch {
            println!("  Branch:     {}", branch);
        }
        if let Some(updated_at) = detail.updated_at {
            println!("  Updated:    {}", updated_at.format("%Y-%m-%d %H:%M UTC"));
        }

        Ok(())
    }
}
