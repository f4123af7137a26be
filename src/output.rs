//! Console output helpers

use crate::inventory::Visibility;
use colored::*;

/// Logger for per-repository console output with consistent formatting
///
/// Each line is prefixed with the repository name in cyan/bold.
///
/// ## Example
///
/// ```rust,no_run
/// use repovis::output::Logger;
///
/// let logger = Logger;
/// logger.success("octo/hello", "toggle visibility: now private");
/// logger.warn("octo/legacy", "toggle visibility: skipped (archived)");
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct Logger;

impl Logger {
    pub fn success(&self, name: &str, msg: &str) {
        println!("{} | {}", name.cyan().bold(), msg.green());
    }

    pub fn warn(&self, name: &str, msg: &str) {
        println!("{} | {}", name.cyan().bold(), msg.yellow());
    }

    pub fn error(&self, name: &str, msg: &str) {
        eprintln!("{} | {}", name.cyan().bold(), msg.red());
    }
}

/// Coloured visibility tag for listings
pub fn visibility_tag(visibility: Visibility) -> ColoredString {
    match visibility {
        Visibility::Public => "public".green(),
        Visibility::Private => "private".yellow(),
    }
}
