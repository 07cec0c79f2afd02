//! Commit message text and conventional commit shape checks.

use std::fmt;
use std::sync::LazyLock;

use regex_lite::Regex;

/// Subject pattern: `type(scope): description`, scope optional.
static SUBJECT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\w+)(?:\(([^)]+)\))?\s*:\s*(\S.*)$").expect("subject pattern is valid")
});

/// Commit types the generator is asked to choose from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitType {
    Feat,
    Fix,
    Docs,
    Style,
    Refactor,
    Test,
    Chore,
}

impl CommitType {
    pub const ALL: [CommitType; 7] = [
        CommitType::Feat,
        CommitType::Fix,
        CommitType::Docs,
        CommitType::Style,
        CommitType::Refactor,
        CommitType::Test,
        CommitType::Chore,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CommitType::Feat => "feat",
            CommitType::Fix => "fix",
            CommitType::Docs => "docs",
            CommitType::Style => "style",
            CommitType::Refactor => "refactor",
            CommitType::Test => "test",
            CommitType::Chore => "chore",
        }
    }

    /// Short description used in the system prompt.
    pub fn description(&self) -> &'static str {
        match self {
            CommitType::Feat => "a new feature",
            CommitType::Fix => "a bug fix",
            CommitType::Docs => "documentation changes",
            CommitType::Style => "formatting changes that do not affect behavior",
            CommitType::Refactor => "code restructuring without behavior change",
            CommitType::Test => "adding or updating tests",
            CommitType::Chore => "build process or auxiliary tool changes",
        }
    }
}

impl fmt::Display for CommitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CommitType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CommitType::ALL
            .into_iter()
            .find(|t| t.as_str() == s.to_lowercase())
            .ok_or_else(|| format!("Unknown commit type: {}", s))
    }
}

/// A generated commit message, trimmed of surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMessage(String);

impl CommitMessage {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First line of the message.
    pub fn subject(&self) -> &str {
        self.0.lines().next().unwrap_or("")
    }

    /// Parse the subject as `type(scope): description`.
    ///
    /// Returns `None` when the subject does not follow the format or the type
    /// is outside the accepted vocabulary.
    pub fn conventional(&self) -> Option<ConventionalSubject> {
        let caps = SUBJECT_PATTERN.captures(self.subject())?;
        let commit_type = caps.get(1)?.as_str().parse::<CommitType>().ok()?;
        Some(ConventionalSubject {
            commit_type,
            scope: caps.get(2).map(|m| m.as_str().to_string()),
            description: caps.get(3)?.as_str().to_string(),
        })
    }
}

impl fmt::Display for CommitMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The parts of a conventional commit subject line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConventionalSubject {
    pub commit_type: CommitType,
    pub scope: Option<String>,
    pub description: String,
}
