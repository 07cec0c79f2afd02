//! ai-commit - A CLI tool that drafts a commit message from the staged diff.
//!
//! # Overview
//!
//! ai-commit checks that the working tree has nothing left unstaged, sends the
//! staged diff to a chat-completion backend with a Conventional Commits
//! instruction, and commits with the returned message (or prints it in
//! debug mode).

pub mod config;
pub mod error;
pub mod generator;
pub mod git;
pub mod message;
pub mod pipeline;

// Re-export commonly used types
pub use config::{Config, ConfigStore};
pub use error::{ConfigError, GeneratorError, GitError, PipelineError};
pub use generator::{GeneratorKind, GeneratorSettings, MessageGenerator, create_generator};
pub use git::{GitCli, VersionControl};
pub use message::{CommitMessage, CommitType};
pub use pipeline::{Outcome, Pipeline, RunMode};
