//! `git` binary adapter.
//!
//! All operations use `std::process::Command` to shell out to the system `git`
//! binary, inheriting the user's existing git config, hooks, and signing setup.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::GitError;

use super::VersionControl;
use super::status::is_clean;

/// Version control backed by the `git` command line, run in `workdir`.
#[derive(Debug, Clone)]
pub struct GitCli {
    workdir: PathBuf,
}

impl GitCli {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    /// Run a git command and return its stdout, or a descriptive error.
    fn run_git(&self, args: &[&str], operation: &str) -> Result<String, GitError> {
        debug!("Running git {}", args.join(" "));

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound if self.workdir.is_dir() => GitError::NotInstalled,
                _ => GitError::SpawnFailed {
                    operation: operation.to_string(),
                    source: e,
                },
            })?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                operation: operation.to_string(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

impl VersionControl for GitCli {
    fn is_repository(&self, path: &Path) -> bool {
        path.join(".git").is_dir()
    }

    fn is_clean_working_tree(&self) -> Result<bool, GitError> {
        let output = self.run_git(&["status", "--porcelain"], "status")?;
        Ok(is_clean(&output))
    }

    fn staged_diff(&self) -> Result<String, GitError> {
        self.run_git(&["diff", "--cached"], "diff --cached")
    }

    fn commit(&self, message: &str) -> Result<(), GitError> {
        let message = message.trim();
        self.run_git(&["commit", "-m", message], "commit")?;
        Ok(())
    }
}
