//! Append-only event log
//!
//! One line per event: `YYYY-MM-DD HH:MM:SS LEVEL event detail`. The engine
//! only ever appends; nothing reads the file back.

use colored::*;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        };
        // pad so that events line up
        write!(f, "{:<5}", label)
    }
}

#[derive(Debug, Default)]
pub struct EventLog {
    path: Option<PathBuf>,
    warned: AtomicBool,
}

impl EventLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            warned: AtomicBool::new(false),
        }
    }

    /// A log that records nothing
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn info(&self, event: &str, detail: impl fmt::Display) {
        self.append(Level::Info, event, detail);
    }

    pub fn warn(&self, event: &str, detail: impl fmt::Display) {
        self.append(Level::Warn, event, detail);
    }

    pub fn error(&self, event: &str, detail: impl fmt::Display) {
        self.append(Level::Error, event, detail);
    }

    /// Append one event; a write failure is reported once and otherwise ignored
    pub fn append(&self, level: Level, event: &str, detail: impl fmt::Display) {
        let Some(path) = &self.path else {
            return;
        };

        let line = format!(
            "{} {} {} {}\n",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            level,
            event,
            detail
        );

        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .and_then(|mut file| file.write_all(line.as_bytes()));

        if let Err(e) = result
            && !self.warned.swap(true, Ordering::Relaxed)
        {
            eprintln!(
                "{}",
                format!("Cannot write event log {}: {}", path.display(), e).yellow()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_appends_timestamped_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("events.log");
        let log = EventLog::new(&path);

        log.info("fetch", "count=2");
        log.error("mutation.failed", "a/b rate limited");

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("INFO  fetch count=2"));
        assert!(lines[1].ends_with("ERROR mutation.failed a/b rate limited"));

        // "YYYY-MM-DD HH:MM:SS " prefix
        let stamp = &lines[0][..19];
        assert!(chrono::NaiveDateTime::parse_from_str(stamp, "%Y-%m-%d %H:%M:%S").is_ok());
    }

    #[test]
    fn test_appends_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("events.log");

        EventLog::new(&path).info("first", "");
        EventLog::new(&path).info("second", "");

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn test_disabled_log_writes_nothing() {
        let log = EventLog::disabled();
        assert!(log.path().is_none());
        log.info("fetch", "ignored");
    }

    #[test]
    fn test_unwritable_path_does_not_panic() {
        let temp_dir = TempDir::new().unwrap();
        let log = EventLog::new(temp_dir.path().join("missing").join("events.log"));
        log.info("fetch", "first");
        log.info("fetch", "second");
        assert!(log.warned.load(Ordering::Relaxed));
    }
}
