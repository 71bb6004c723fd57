//! ai-commit - generate Conventional Commit messages from git diffs with an LLM.
//!
//! # Overview
//!
//! A diff is rendered into one of several prompt templates, sent to an
//! OpenAI-compatible chat completion endpoint with retry, and the JSON
//! reply is validated, scanned for secrets and formatted into a commit
//! message ready to hand to git.

pub mod commit;
pub mod config;
pub mod error;
pub mod evaluate;
pub mod generate;
pub mod git;
pub mod llm;
pub mod prompt;

// Re-export commonly used types
pub use commit::{CommitMsg, SensitiveInfoReport, SensitiveIssue};
pub use config::Config;
pub use error::{ConfigError, EvaluationError, GenerationError, GitError, PipelineError, ProviderError};
pub use evaluate::{DatasetRow, EvaluationReport};
pub use generate::{GenerationRequest, GenerationSettings, Generator};
pub use llm::{OpenAiProvider, RetryPolicy, TextProvider};
pub use prompt::PromptVersion;
