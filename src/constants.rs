//! Central constants for the repovis application

/// Default values for configuration
pub mod config {
    /// Default settings file name
    pub const DEFAULT_CONFIG_FILE: &str = "repovis.yaml";

    /// Default event log file
    pub const DEFAULT_LOG_FILE: &str = "repovis.log";

    /// Default directory for snapshot files
    pub const DEFAULT_SNAPSHOT_DIR: &str = ".";

    /// Maximum number of repositories requested from the platform
    pub const DEFAULT_LIST_LIMIT: usize = 1000;

    /// Per-call timeout for the `gh` client, in seconds
    pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
}

/// Snapshot file format
pub mod snapshot {
    /// Allowed snapshot file names
    pub const FILENAME_PATTERN: &str = r"^[A-Za-z0-9_.-]+\.csv$";

    /// A well-formed snapshot line
    pub const LINE_PATTERN: &str = r"^[^,]+,(public|private),(true|false)$";

    /// A repository identifier in `owner/name` form
    pub const FULL_NAME_PATTERN: &str = r"^[A-Za-z0-9_.-]+/[A-Za-z0-9_.-]+$";

    /// Field separator
    pub const DELIMITER: char = ',';
}

/// Process exit codes
pub mod exit {
    /// A required external program or the terminal is unavailable
    pub const MISSING_DEPENDENCY: i32 = 1;

    /// Any other error reported by a subcommand
    pub const FAILURE: i32 = 1;
}
