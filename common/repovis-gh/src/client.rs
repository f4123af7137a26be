//! `gh` process runner

use crate::util::{describe_exit_code, parse_http_status};
use std::fmt;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Executable looked up on PATH when no explicit program is configured
pub const DEFAULT_PROGRAM: &str = "gh";

/// Upper bound for a single `gh` invocation
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Failure reported by a `gh` invocation
///
/// `status` carries the HTTP status code when `gh` printed one
/// (for example `HTTP 404: Not Found`), so callers can classify
/// without relying on the free-text message alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GhError {
    pub status: Option<u16>,
    pub message: String,
}

impl GhError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Build an error from a non-zero exit of the `gh` process
    pub(crate) fn from_failure(exit_code: Option<i32>, stderr: &str) -> Self {
        let stderr = stderr.trim();
        let message = if stderr.is_empty() {
            match exit_code {
                Some(code) => format!("gh exited with code {} ({})", code, describe_exit_code(code)),
                None => "gh terminated by signal".to_string(),
            }
        } else {
            stderr.to_string()
        };

        Self {
            status: parse_http_status(stderr),
            message,
        }
    }
}

impl fmt::Display for GhError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} (HTTP {})", self.message, status),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for GhError {}

/// Client that shells out to the `gh` executable
///
/// Each call spawns one process and waits for it, bounded by `timeout`.
/// A call that exceeds the timeout is killed and reported as a [`GhError`].
#[derive(Debug, Clone)]
pub struct GhClient {
    pub(crate) program: String,
    pub(crate) timeout: Duration,
}

impl GhClient {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run `gh` with the given arguments and return its stdout
    pub(crate) async fn run(&self, args: &[&str]) -> Result<String, GhError> {
        let mut command = Command::new(&self.program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = match tokio::time::timeout(self.timeout, command.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(GhError::new(format!(
                    "failed to execute {}: {}",
                    self.program, e
                )));
            }
            Err(_) => {
                return Err(GhError::new(format!(
                    "{} {} timed out after {}s",
                    self.program,
                    args.join(" "),
                    self.timeout.as_secs()
                )));
            }
        };

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            Err(GhError::from_failure(
                output.status.code(),
                &String::from_utf8_lossy(&output.stderr),
            ))
        }
    }
}

impl Default for GhClient {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_failure_uses_stderr_and_status() {
        let error = GhError::from_failure(
            Some(1),
            "HTTP 404: Not Found (https://api.github.com/repos/a/b)\n",
        );
        assert_eq!(error.status, Some(404));
        assert_eq!(
            error.message,
            "HTTP 404: Not Found (https://api.github.com/repos/a/b)"
        );
    }

    #[test]
    fn test_from_failure_empty_stderr_describes_exit_code() {
        let error = GhError::from_failure(Some(4), "  ");
        assert_eq!(error.status, None);
        assert_eq!(error.message, "gh exited with code 4 (authentication required)");
    }

    #[test]
    fn test_display_includes_status() {
        let error = GhError::new("forbidden").with_status(403);
        assert_eq!(error.to_string(), "forbidden (HTTP 403)");
        assert_eq!(GhError::new("boom").to_string(), "boom");
    }

    #[tokio::test]
    async fn test_run_missing_program_is_an_error() {
        let client = GhClient::new("repovis-definitely-not-installed");
        let error = client.run(&["--version"]).await.unwrap_err();
        assert!(error.message.starts_with("failed to execute"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_times_out() {
        let client = GhClient::new("sleep").with_timeout(Duration::from_millis(100));
        let error = client.run(&["5"]).await.unwrap_err();
        assert!(error.message.contains("timed out"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_returns_stdout() {
        let client = GhClient::new("echo");
        let stdout = client.run(&["hello"]).await.unwrap();
        assert_eq!(stdout.trim(), "hello");
    }
}
