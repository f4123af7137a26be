//! Utility modules for common functionality

pub mod dependencies;
pub mod validators;

// Re-export commonly used functions
pub use dependencies::{MissingDependency, check_dependencies, find_executable};
pub use validators::{is_snapshot_line, validate_full_name, validate_snapshot_filename};
