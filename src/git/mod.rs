//! Version-control adapter: repository checks, staged diff, and commit.

pub mod cli;
pub mod status;

pub use cli::GitCli;
pub use status::{StatusEntry, is_clean, parse_porcelain};

use std::path::Path;

use crate::error::GitError;

/// Operations the commit pipeline needs from the version-control tool.
///
/// This abstraction allows replacing the `git` binary in tests.
#[cfg_attr(test, mockall::automock)]
pub trait VersionControl {
    /// Whether `path` holds a repository marker directory.
    fn is_repository(&self, path: &Path) -> bool;

    /// Whether the worktree has no unstaged modifications or untracked files.
    ///
    /// Staged-only entries do not make the tree dirty.
    fn is_clean_working_tree(&self) -> Result<bool, GitError>;

    /// The staged diff as unified-diff text; empty when nothing is staged.
    fn staged_diff(&self) -> Result<String, GitError>;

    /// Commit the index with `message`, trimmed of surrounding whitespace.
    fn commit(&self, message: &str) -> Result<(), GitError>;
}
