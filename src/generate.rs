//! Generation pipeline: prompt, provider call, extraction, scanning, formatting.

use tracing::debug;

use crate::commit::{CommitMsg, extract_record, format_message, scan};
use crate::error::{GenerationError, PipelineError};
use crate::llm::{CompletionRequest, RetryPolicy, TextProvider, retry_with_backoff};
use crate::prompt;

pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 300;
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

/// One generation call's inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub diff: String,
    pub model: String,
    pub prompt_version: String,
    pub language: String,
}

/// Provider call parameters shared by every request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSettings {
    pub max_output_tokens: u32,
    pub temperature: f32,
    pub retry: RetryPolicy,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            retry: RetryPolicy::default(),
        }
    }
}

/// Turns a diff into a validated, formatted commit message.
pub struct Generator<P> {
    provider: P,
    settings: GenerationSettings,
}

impl<P: TextProvider> Generator<P> {
    pub fn new(provider: P, settings: GenerationSettings) -> Self {
        Self { provider, settings }
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    /// Run the full pipeline for one request.
    ///
    /// Steps, in order: resolve the prompt, render it, call the provider
    /// with retry, extract the record, scan it and format it. Any failure
    /// is reported as a single [`GenerationError`] whose cause names the
    /// failing step. The provider is never called for an unknown prompt
    /// version or an empty diff.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<CommitMsg, GenerationError> {
        Ok(self.run(request).await?)
    }

    async fn run(&self, request: &GenerationRequest) -> Result<CommitMsg, PipelineError> {
        let template = prompt::resolve(&request.prompt_version)?;

        if request.diff.trim().is_empty() {
            return Err(PipelineError::EmptyDiff);
        }

        let completion = CompletionRequest {
            model: request.model.clone(),
            prompt: prompt::render(&template, &request.diff, &request.language),
            max_output_tokens: self.settings.max_output_tokens,
            temperature: self.settings.temperature,
        };

        debug!(
            model = %completion.model,
            prompt_version = %template.version,
            prompt_len = completion.prompt.len(),
            "Requesting commit message"
        );

        let provider = &self.provider;
        let completion = &completion;
        let raw = retry_with_backoff(&self.settings.retry, move || provider.complete(completion))
            .await?;

        if raw.trim().is_empty() {
            return Err(PipelineError::EmptyResponse);
        }

        let candidate = extract_record(&raw)?;

        let report = scan(&format!("{}\n{}", candidate.subject, candidate.body));
        if report.has_secrets {
            debug!("Sensitive content found: {:?}", report.issues);
            return Err(PipelineError::SensitiveContentDetected(report.issues));
        }

        let formatted = format_message(&candidate.subject, &candidate.body);

        // A subject made only of whitespace and a terminator formats to nothing
        if formatted.subject.is_empty() {
            return Err(PipelineError::MissingRequiredField("subject"));
        }

        Ok(CommitMsg {
            subject: formatted.subject,
            body: formatted.body,
            breaking: candidate.breaking,
            score: candidate.score,
            reason: candidate.reason,
        })
    }
}
