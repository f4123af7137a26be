//! Interactive menu loop

use super::{
    ApplyCommand, Command, DetailCommand, ListCommand, RefreshCommand, SaveCommand, Session,
    ToggleCommand,
};
use anyhow::Result;
use async_trait::async_trait;
use colored::*;

/// Actions offered by the main menu, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    ListAll,
    ToggleVisibility,
    ToggleArchive,
    SaveSnapshot,
    ApplySnapshot,
    Search,
    ShowDetail,
    Refresh,
    Exit,
}

impl MenuAction {
    pub const ALL: [MenuAction; 9] = [
        MenuAction::ListAll,
        MenuAction::ToggleVisibility,
        MenuAction::ToggleArchive,
        MenuAction::SaveSnapshot,
        MenuAction::ApplySnapshot,
        MenuAction::Search,
        MenuAction::ShowDetail,
        MenuAction::Refresh,
        MenuAction::Exit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuAction::ListAll => "List all repositories",
            MenuAction::ToggleVisibility => "Toggle visibility",
            MenuAction::ToggleArchive => "Toggle archive status",
            MenuAction::SaveSnapshot => "Save snapshot",
            MenuAction::ApplySnapshot => "Load and apply snapshot",
            MenuAction::Search => "Search by keyword",
            MenuAction::ShowDetail => "Show repository details",
            MenuAction::Refresh => "Refresh cache",
            MenuAction::Exit => "Exit",
        }
    }

    /// Numbered menu entries
    pub fn items() -> Vec<String> {
        Self::ALL
            .iter()
            .enumerate()
            .map(|(i, action)| format!("{}. {}", i + 1, action.label()))
            .collect()
    }
}

/// The interactive session: repeat menu actions until the user exits
///
/// A failing action is reported and the loop continues.
pub struct MenuCommand;

impl MenuCommand {
    async fn dispatch(action: MenuAction, session: &mut Session) -> Result<()> {
        match action {
            MenuAction::ListAll => ListCommand::all().execute(session).await,
            MenuAction::ToggleVisibility => ToggleCommand::visibility().execute(session).await,
            MenuAction::ToggleArchive => ToggleCommand::archive().execute(session).await,
            MenuAction::SaveSnapshot => SaveCommand { file: None }.execute(session).await,
            MenuAction::ApplySnapshot => ApplyCommand { file: None }.execute(session).await,
            MenuAction::Search => {
                let Some(keyword) = session.prompter.input("Keyword") else {
                    return Ok(());
                };
                if keyword.trim().is_empty() {
                    return Ok(());
                }
                ListCommand::search(keyword).execute(session).await
            }
            MenuAction::ShowDetail => DetailCommand { full_name: None }.execute(session).await,
            MenuAction::Refresh => RefreshCommand.execute(session).await,
            MenuAction::Exit => Ok(()),
        }
    }
}

#[async_trait]
impl Command for MenuCommand {
    async fn execute(&self, session: &mut Session) -> Result<()> {
        session.events.info("session.start", "interactive");
        let items = MenuAction::items();

        loop {
            println!();
            let action = match session.prompter.select("What do you want to do?", &items) {
                Some(index) => MenuAction::ALL.get(index).copied().unwrap_or(MenuAction::Exit),
                None => MenuAction::Exit,
            };
            if action == MenuAction::Exit {
                break;
            }

            if let Err(e) = Self::dispatch(action, session).await {
                eprintln!("{}", format!("Error: {:#}", e).red());
                session
                    .events
                    .error("action.failed", format!("{} {:#}", action.label(), e));
            }
        }

        session.events.info("session.end", "interactive");
        Ok(())
    }
}
