//! Startup checks for external programs

use std::env;
use std::path::{Path, PathBuf};

/// Locate an executable by name on PATH, or verify an explicit path
pub fn find_executable(program: &str) -> Option<PathBuf> {
    let candidate = Path::new(program);
    if candidate.components().count() > 1 {
        return is_executable(candidate).then(|| candidate.to_path_buf());
    }

    let path_env = env::var_os("PATH")?;
    env::split_paths(&path_env)
        .flat_map(|dir| executable_names(program).map(move |name| dir.join(name)))
        .find(|path| is_executable(path))
}

#[cfg(windows)]
fn executable_names(program: &str) -> impl Iterator<Item = String> + '_ {
    ["", ".exe", ".bat", ".cmd", ".com"]
        .into_iter()
        .map(move |ext| format!("{}{}", program, ext))
}

#[cfg(not(windows))]
fn executable_names(program: &str) -> impl Iterator<Item = String> + '_ {
    std::iter::once(program.to_string())
}

/// Check if a file is executable
fn is_executable(path: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Ok(metadata) = std::fs::metadata(path) {
            return metadata.is_file() && metadata.permissions().mode() & 0o111 != 0;
        }
    }

    #[cfg(windows)]
    {
        use std::ffi::OsStr;
        if let Some(extension) = path.extension().and_then(OsStr::to_str) {
            let executable_extensions = ["exe", "bat", "cmd", "com"];
            return path.is_file()
                && executable_extensions
                    .iter()
                    .any(|&ext| ext.eq_ignore_ascii_case(extension));
        }
    }

    false
}

/// Whether the prompt renderer (which draws on stderr) has a terminal
pub fn has_terminal() -> bool {
    console::user_attended_stderr()
}

/// A dependency required at startup that is not available
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissingDependency {
    Program(String),
    Terminal,
}

impl std::fmt::Display for MissingDependency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissingDependency::Program(program) => write!(
                f,
                "Required program '{}' was not found. Install the GitHub CLI (https://cli.github.com) or set gh_program in the settings file.",
                program
            ),
            MissingDependency::Terminal => {
                write!(f, "Interactive mode needs a terminal for its menus")
            }
        }
    }
}

impl std::error::Error for MissingDependency {}

/// Verify the `gh` program and, for interactive runs, the terminal
pub fn check_dependencies(program: &str, interactive: bool) -> Result<PathBuf, MissingDependency> {
    let path =
        find_executable(program).ok_or_else(|| MissingDependency::Program(program.to_string()))?;

    if interactive && !has_terminal() {
        return Err(MissingDependency::Terminal);
    }

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    #[cfg(unix)]
    fn write_executable(dir: &Path, name: &str, mode: u32) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.join(name);
        fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(mode)).unwrap();
        path
    }

    #[cfg(unix)]
    #[test]
    #[serial]
    fn test_find_executable_on_path() {
        let temp_dir = TempDir::new().unwrap();
        let expected = write_executable(temp_dir.path(), "fake-gh", 0o755);
        write_executable(temp_dir.path(), "not-exec", 0o644);

        let original_path = env::var_os("PATH");
        unsafe {
            env::set_var("PATH", temp_dir.path());
        }

        let found = find_executable("fake-gh");
        let not_exec = find_executable("not-exec");
        let missing = find_executable("nope");

        if let Some(path) = original_path {
            unsafe {
                env::set_var("PATH", path);
            }
        }

        assert_eq!(found, Some(expected));
        assert_eq!(not_exec, None);
        assert_eq!(missing, None);
    }

    #[cfg(unix)]
    #[test]
    fn test_find_executable_explicit_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_executable(temp_dir.path(), "gh", 0o755);

        assert_eq!(find_executable(path.to_str().unwrap()), Some(path.clone()));
        assert_eq!(
            find_executable(temp_dir.path().join("missing").to_str().unwrap()),
            None
        );
    }

    #[test]
    #[serial]
    fn test_check_dependencies_reports_missing_program() {
        let error = check_dependencies("repovis-no-such-program", false).unwrap_err();
        assert_eq!(
            error,
            MissingDependency::Program("repovis-no-such-program".to_string())
        );
        assert!(error.to_string().contains("repovis-no-such-program"));
    }
}
