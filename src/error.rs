//! Error types for ai-commit modules using thiserror.

use thiserror::Error;

use crate::commit::scanner::SensitiveIssue;

/// Errors from the text-generation provider. All of them are retried.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Request to provider failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("Provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode provider response: {0}")]
    Decode(String),

    #[error("Provider response contained no choices")]
    NoChoices,

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Failures inside the generation pipeline, classified by the step that
/// produced them.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Diff is empty; nothing to describe")]
    EmptyDiff,

    #[error("Unsupported prompt version '{0}' (expected one of prompt_A, prompt_B, prompt_C)")]
    UnsupportedPromptVersion(String),

    #[error("Provider returned an empty response")]
    EmptyResponse,

    #[error("Provider returned a malformed response: {0}")]
    MalformedResponse(String),

    #[error("Provider response is missing required field '{0}'")]
    MissingRequiredField(&'static str),

    #[error("Generated message contains sensitive content: {}", join_issues(.0))]
    SensitiveContentDetected(Vec<SensitiveIssue>),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

fn join_issues(issues: &[SensitiveIssue]) -> String {
    issues
        .iter()
        .map(|i| i.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// The single outward-facing error of [`crate::generate::Generator::generate`].
///
/// Wraps whichever pipeline step failed; the message of the cause is kept
/// in the display output.
#[derive(Error, Debug)]
#[error("Commit message generation failed: {source}")]
pub struct GenerationError {
    #[source]
    source: PipelineError,
}

impl GenerationError {
    pub fn cause(&self) -> &PipelineError {
        &self.source
    }

    pub fn into_cause(self) -> PipelineError {
        self.source
    }
}

impl From<PipelineError> for GenerationError {
    fn from(source: PipelineError) -> Self {
        Self { source }
    }
}

/// Errors from configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable {0} is not set. Add it to your environment or a .env file")]
    MissingVar(&'static str),
}

/// Errors from git diff collection and commit creation.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Failed to open repository: {0}")]
    OpenRepository(#[source] git2::Error),

    #[error("Failed to collect diff: {0}")]
    DiffFailed(#[source] git2::Error),

    #[error("Repository has no commits yet")]
    NoCommits,

    #[error("Failed to create commit: {0}")]
    CommitFailed(#[source] git2::Error),

    #[error("Git config error (missing user.name or user.email): {0}")]
    ConfigError(#[source] git2::Error),
}

/// Errors from the evaluation harness.
#[derive(Error, Debug)]
pub enum EvaluationError {
    #[error("Failed to read dataset: {0}")]
    ReadFailed(#[source] std::io::Error),

    #[error("Dataset contains no valid rows")]
    EmptyDataset,

    #[error("No dataset row could be processed for {model} / {prompt_version}")]
    NothingProcessed {
        model: String,
        prompt_version: String,
    },
}
