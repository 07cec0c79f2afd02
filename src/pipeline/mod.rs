//! The commit pipeline: repository checks, generation, and commit.
//!
//! Steps run strictly in order and the first failure ends the run:
//! 1. Check the directory is a repository
//! 2. Check the working tree has no unstaged or untracked changes
//! 3. Read the staged diff and require it to be non-empty
//! 4. Generate a message from the diff
//! 5. Commit, or return the message without committing in dry-run mode

use std::path::PathBuf;

use tracing::{debug, warn};

use crate::error::{GeneratorError, PipelineError};
use crate::generator::MessageGenerator;
use crate::git::VersionControl;
use crate::message::CommitMessage;

/// Whether the final commit step runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Commit,
    DryRun,
}

impl RunMode {
    pub fn from_debug_flag(debug: bool) -> Self {
        if debug { RunMode::DryRun } else { RunMode::Commit }
    }
}

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The message was generated but not committed.
    DryRun(CommitMessage),
    /// A commit was created with this message.
    Committed(CommitMessage),
}

impl Outcome {
    pub fn message(&self) -> &CommitMessage {
        match self {
            Outcome::DryRun(m) | Outcome::Committed(m) => m,
        }
    }
}

/// Sequences the version-control and generator calls for one run.
pub struct Pipeline<V, G> {
    vcs: V,
    generator: G,
    workdir: PathBuf,
}

impl<V, G> Pipeline<V, G>
where
    V: VersionControl,
    G: MessageGenerator,
{
    pub fn new(vcs: V, generator: G, workdir: impl Into<PathBuf>) -> Self {
        Self {
            vcs,
            generator,
            workdir: workdir.into(),
        }
    }

    /// Run the pipeline once.
    pub async fn run(&self, mode: RunMode) -> Result<Outcome, PipelineError> {
        debug!("Checking repository at {}", self.workdir.display());
        if !self.vcs.is_repository(&self.workdir) {
            return Err(PipelineError::NotARepository(self.workdir.clone()));
        }

        debug!("Checking working tree status");
        let clean = self
            .vcs
            .is_clean_working_tree()
            .map_err(PipelineError::CheckClean)?;
        if !clean {
            return Err(PipelineError::DirtyWorkingTree);
        }

        debug!("Reading staged diff");
        let diff = self.vcs.staged_diff().map_err(PipelineError::FetchDiff)?;
        if diff.is_empty() {
            return Err(PipelineError::NoStagedChanges);
        }
        debug!("Staged diff is {} bytes", diff.len());

        let raw = self
            .generator
            .generate(&diff)
            .await
            .map_err(PipelineError::Generate)?;
        let message = CommitMessage::new(&raw);
        if message.is_empty() {
            return Err(PipelineError::Generate(GeneratorError::EmptyResponse));
        }

        if message.conventional().is_none() {
            warn!(
                "Generated message does not follow <type>(<scope>): <description>: {}",
                message.subject()
            );
        }

        match mode {
            RunMode::DryRun => {
                debug!("Dry run, skipping commit");
                Ok(Outcome::DryRun(message))
            }
            RunMode::Commit => {
                self.vcs
                    .commit(message.as_str())
                    .map_err(PipelineError::Commit)?;
                Ok(Outcome::Committed(message))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    use crate::error::GitError;
    use crate::generator::MockMessageGenerator;
    use crate::git::MockVersionControl;

    const DIFF: &str = "diff --git a/x b/x\n+hello";

    fn ready_vcs() -> MockVersionControl {
        let mut vcs = MockVersionControl::new();
        vcs.expect_is_repository().return_const(true);
        vcs.expect_is_clean_working_tree().returning(|| Ok(true));
        vcs.expect_staged_diff().returning(|| Ok(DIFF.to_string()));
        vcs
    }

    fn generator_returning(text: &'static str) -> MockMessageGenerator {
        let mut generator = MockMessageGenerator::new();
        generator
            .expect_generate()
            .withf(|diff| diff == DIFF)
            .times(1)
            .returning(move |_| Ok(text.to_string()));
        generator
    }

    fn failed(operation: &str) -> GitError {
        GitError::CommandFailed {
            operation: operation.to_string(),
            code: Some(128),
            stderr: "fatal".to_string(),
        }
    }

    #[tokio::test]
    async fn test_commit_receives_trimmed_message() {
        let mut vcs = ready_vcs();
        vcs.expect_commit()
            .withf(|msg| msg == "feat(x): add hello")
            .times(1)
            .returning(|_| Ok(()));

        let pipeline = Pipeline::new(vcs, generator_returning("  feat(x): add hello\n\n"), "/repo");
        let outcome = pipeline.run(RunMode::Commit).await.unwrap();
        assert_eq!(
            outcome,
            Outcome::Committed(CommitMessage::new("feat(x): add hello"))
        );
    }

    #[tokio::test]
    async fn test_dry_run_never_commits() {
        let mut vcs = ready_vcs();
        vcs.expect_commit().never();

        let pipeline = Pipeline::new(vcs, generator_returning("feat(x): add hello\n"), "/repo");
        let outcome = pipeline.run(RunMode::DryRun).await.unwrap();
        assert_eq!(outcome.message().as_str(), "feat(x): add hello");
        assert!(matches!(outcome, Outcome::DryRun(_)));
    }

    #[tokio::test]
    async fn test_not_a_repository_stops_before_anything_else() {
        let mut vcs = MockVersionControl::new();
        vcs.expect_is_repository().return_const(false);
        vcs.expect_is_clean_working_tree().never();
        vcs.expect_staged_diff().never();
        vcs.expect_commit().never();
        let mut generator = MockMessageGenerator::new();
        generator.expect_generate().never();

        let pipeline = Pipeline::new(vcs, generator, "/not/a/repo");
        let err = pipeline.run(RunMode::Commit).await.unwrap_err();
        assert!(matches!(err, PipelineError::NotARepository(ref p) if p == Path::new("/not/a/repo")));
        assert!(err.to_string().contains("not a git repository"));
    }

    #[tokio::test]
    async fn test_dirty_tree_stops_before_diff() {
        let mut vcs = MockVersionControl::new();
        vcs.expect_is_repository().return_const(true);
        vcs.expect_is_clean_working_tree().returning(|| Ok(false));
        vcs.expect_staged_diff().never();
        let mut generator = MockMessageGenerator::new();
        generator.expect_generate().never();

        let pipeline = Pipeline::new(vcs, generator, "/repo");
        let err = pipeline.run(RunMode::Commit).await.unwrap_err();
        assert!(matches!(err, PipelineError::DirtyWorkingTree));
        assert!(err.to_string().contains("git add"));
    }

    #[tokio::test]
    async fn test_status_failure_is_check_clean_error() {
        let mut vcs = MockVersionControl::new();
        vcs.expect_is_repository().return_const(true);
        vcs.expect_is_clean_working_tree()
            .returning(|| Err(failed("status")));
        let generator = MockMessageGenerator::new();

        let pipeline = Pipeline::new(vcs, generator, "/repo");
        let err = pipeline.run(RunMode::Commit).await.unwrap_err();
        assert!(matches!(err, PipelineError::CheckClean(GitError::CommandFailed { .. })));
    }

    #[tokio::test]
    async fn test_empty_diff_never_calls_generator() {
        let mut vcs = MockVersionControl::new();
        vcs.expect_is_repository().return_const(true);
        vcs.expect_is_clean_working_tree().returning(|| Ok(true));
        vcs.expect_staged_diff().returning(|| Ok(String::new()));
        vcs.expect_commit().never();
        let mut generator = MockMessageGenerator::new();
        generator.expect_generate().never();

        let pipeline = Pipeline::new(vcs, generator, "/repo");
        let err = pipeline.run(RunMode::Commit).await.unwrap_err();
        assert!(matches!(err, PipelineError::NoStagedChanges));
    }

    #[tokio::test]
    async fn test_diff_failure_is_fetch_diff_error() {
        let mut vcs = MockVersionControl::new();
        vcs.expect_is_repository().return_const(true);
        vcs.expect_is_clean_working_tree().returning(|| Ok(true));
        vcs.expect_staged_diff().returning(|| Err(failed("diff --cached")));
        let mut generator = MockMessageGenerator::new();
        generator.expect_generate().never();

        let pipeline = Pipeline::new(vcs, generator, "/repo");
        let err = pipeline.run(RunMode::Commit).await.unwrap_err();
        assert!(matches!(err, PipelineError::FetchDiff(_)));
    }

    #[tokio::test]
    async fn test_generator_failure_is_wrapped_and_no_commit() {
        let mut vcs = ready_vcs();
        vcs.expect_commit().never();
        let mut generator = MockMessageGenerator::new();
        generator.expect_generate().times(1).returning(|_| {
            Err(GeneratorError::HttpStatus {
                status: 401,
                body: r#"{"error":"invalid key"}"#.to_string(),
            })
        });

        let pipeline = Pipeline::new(vcs, generator, "/repo");
        let err = pipeline.run(RunMode::Commit).await.unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Generate(GeneratorError::HttpStatus { status: 401, .. })
        ));
        assert!(err.to_string().contains("invalid key"));
    }

    #[tokio::test]
    async fn test_empty_response_is_not_retried() {
        let mut vcs = ready_vcs();
        vcs.expect_commit().never();
        let mut generator = MockMessageGenerator::new();
        generator
            .expect_generate()
            .times(1)
            .returning(|_| Err(GeneratorError::EmptyResponse));

        let pipeline = Pipeline::new(vcs, generator, "/repo");
        let err = pipeline.run(RunMode::Commit).await.unwrap_err();
        assert!(matches!(err, PipelineError::Generate(GeneratorError::EmptyResponse)));
    }

    #[tokio::test]
    async fn test_blank_generated_text_is_empty_response() {
        let mut vcs = ready_vcs();
        vcs.expect_commit().never();

        let pipeline = Pipeline::new(vcs, generator_returning("  \n"), "/repo");
        let err = pipeline.run(RunMode::DryRun).await.unwrap_err();
        assert!(matches!(err, PipelineError::Generate(GeneratorError::EmptyResponse)));
    }

    #[tokio::test]
    async fn test_commit_failure_is_commit_error() {
        let mut vcs = ready_vcs();
        vcs.expect_commit()
            .times(1)
            .returning(|_| Err(failed("commit")));

        let pipeline = Pipeline::new(vcs, generator_returning("fix: typo"), "/repo");
        let err = pipeline.run(RunMode::Commit).await.unwrap_err();
        assert!(matches!(err, PipelineError::Commit(_)));
    }

    #[tokio::test]
    async fn test_non_conventional_message_is_still_committed() {
        let mut vcs = ready_vcs();
        vcs.expect_commit()
            .withf(|msg| msg == "Added hello")
            .times(1)
            .returning(|_| Ok(()));

        let pipeline = Pipeline::new(vcs, generator_returning("Added hello\n"), "/repo");
        assert!(pipeline.run(RunMode::Commit).await.is_ok());
    }

    #[test]
    fn test_run_mode_from_debug_flag() {
        assert_eq!(RunMode::from_debug_flag(true), RunMode::DryRun);
        assert_eq!(RunMode::from_debug_flag(false), RunMode::Commit);
    }
}
