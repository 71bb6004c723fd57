//! Commit message records: extraction from model output and the final value.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PipelineError;
use crate::llm::strip_code_fence;

/// Raw wire shape requested from the model. Every key is optional here so
/// that defaults and the required-field check are applied in one place.
#[derive(Debug, Deserialize)]
struct RawRecord {
    subject: Option<String>,
    body: Option<String>,
    breaking: Option<bool>,
    score: Option<serde_json::Number>,
    reason: Option<String>,
}

/// A validated but not yet formatted record from the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitCandidate {
    pub subject: String,
    pub body: String,
    pub breaking: bool,
    pub score: i64,
    pub reason: String,
}

/// Extract and validate the structured record from a raw model reply.
///
/// A fenced code block, if present, is unwrapped first. Absent optional
/// fields default to empty/false/0; unknown fields are ignored.
pub fn extract_record(raw: &str) -> Result<CommitCandidate, PipelineError> {
    if raw.trim().is_empty() {
        return Err(PipelineError::EmptyResponse);
    }

    let candidate = strip_code_fence(raw);
    let record: RawRecord = serde_json::from_str(candidate).map_err(|e| {
        debug!("Failed to parse model reply as commit record: {}", e);
        debug!("Raw reply: {}", raw);
        PipelineError::MalformedResponse(e.to_string())
    })?;

    let subject = record
        .subject
        .filter(|s| !s.trim().is_empty())
        .ok_or(PipelineError::MissingRequiredField("subject"))?;

    let score = record
        .score
        .and_then(|n| n.as_i64().or_else(|| n.as_f64().map(|f| f.round() as i64)))
        .unwrap_or(0);

    Ok(CommitCandidate {
        subject,
        body: record.body.unwrap_or_default(),
        breaking: record.breaking.unwrap_or(false),
        score,
        reason: record.reason.unwrap_or_default(),
    })
}

/// The final, formatted and scanned commit message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitMsg {
    pub subject: String,
    pub body: String,
    pub breaking: bool,
    /// Model's self-assessed quality score, passed through as-is.
    pub score: i64,
    pub reason: String,
}

impl CommitMsg {
    /// Render the message as git expects it: subject, blank line, body.
    pub fn to_message(&self) -> String {
        if self.body.trim().is_empty() {
            self.subject.clone()
        } else {
            format!("{}\n\n{}", self.subject, self.body)
        }
    }
}
