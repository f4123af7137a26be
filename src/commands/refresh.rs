//! Cache refresh command

use super::{Command, Session};
use anyhow::Result;
use async_trait::async_trait;
use colored::*;

/// Drop the cached inventory and fetch it again
pub struct RefreshCommand;

#[async_trait]
impl Command for RefreshCommand {
    async fn execute(&self, session: &mut Session) -> Result<()> {
        session.cache.invalidate();
        session.events.info("cache.invalidate", "manual refresh");

        let inventory = session.inventory(true).await?;
        println!(
            "{}",
            format!("Fetched {} repositories", inventory.len()).green()
        );
        Ok(())
    }
}
