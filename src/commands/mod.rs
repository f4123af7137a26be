//! Command implementations

pub mod base;
pub mod detail;
pub mod list;
pub mod menu;
pub mod refresh;
pub mod snapshot;
pub mod toggle;

// Re-export the base types and all commands for easy access
pub use base::{Command, Session};
pub use detail::DetailCommand;
pub use list::ListCommand;
pub use menu::{MenuAction, MenuCommand};
pub use refresh::RefreshCommand;
pub use snapshot::{ApplyCommand, SaveCommand};
pub use toggle::ToggleCommand;
