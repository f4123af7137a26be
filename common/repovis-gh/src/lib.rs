//! GitHub CLI client library
//!
//! This library wraps the `gh` command-line client for the handful of
//! repository operations repovis needs: listing, describing, changing
//! visibility and archiving.
//!
//! ## Modules
//!
//! - [`client`]: Process runner with a bounded per-call timeout
//! - [`repositories`]: Repository listing and mutation commands
//! - [`util`]: Helpers for interpreting `gh` failures

mod client;
mod repositories;
mod util;

// Re-export public API
pub use client::{DEFAULT_PROGRAM, DEFAULT_TIMEOUT, GhClient, GhError};
pub use repositories::{BranchRef, GhRepo, GhRepoDetail, parse_repo_detail, parse_repo_list};
pub use util::{describe_exit_code, parse_http_status};
