//! Error types for ai-commit modules using thiserror.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from running the external `git` binary.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("git is not installed or not on PATH")]
    NotInstalled,

    #[error("Failed to run git {operation}: {source}")]
    SpawnFailed {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("git {operation} exited with {}: {stderr}",
             .code.map_or("unknown status".to_string(), |c| format!("code {c}")))]
    CommandFailed {
        operation: String,
        code: Option<i32>,
        stderr: String,
    },
}

/// Errors from calling a remote text-generation backend.
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Request to generation service failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Generation service returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Generation service returned an unexpected body: {source}. Body: {body}")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    #[error("Generation service returned no commit message")]
    EmptyResponse,

    #[error("Unknown generator '{0}'. Available: openai, enterprise")]
    UnknownGenerator(String),

    #[error(
        "The {0} generator needs an endpoint. Set AI_COMMIT_ENDPOINT or add \"enterprise_endpoint\" to the config file"
    )]
    MissingEndpoint(String),

    #[error("API key contains characters that cannot be sent in an HTTP header")]
    InvalidCredential,

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

/// Errors from loading or saving the persisted configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine the home directory for the config file")]
    NoHomeDir,

    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to create config directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Failed to read API key from terminal: {0}")]
    Prompt(String),

    #[error("API key must not be empty")]
    EmptyApiKey,
}

/// Errors from the commit pipeline, tagged with the step that failed.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("{} is not a git repository", .0.display())]
    NotARepository(PathBuf),

    #[error("Failed to check working tree status: {0}")]
    CheckClean(#[source] GitError),

    #[error(
        "Working tree has unstaged or untracked changes. Stage them with 'git add' first"
    )]
    DirtyWorkingTree,

    #[error("Failed to read staged diff: {0}")]
    FetchDiff(#[source] GitError),

    #[error("No staged changes. Stage changes with 'git add' first")]
    NoStagedChanges,

    #[error("Failed to generate commit message: {0}")]
    Generate(#[source] GeneratorError),

    #[error("Failed to create commit: {0}")]
    Commit(#[source] GitError),
}

/// Collapse an error message onto one line.
///
/// Response bodies and git stderr are kept verbatim inside the error values
/// and may span several lines; the CLI reports errors as a single line.
pub fn single_line(message: &str) -> String {
    message.split_whitespace().collect::<Vec<_>>().join(" ")
}
