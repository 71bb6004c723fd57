//! JSON Lines evaluation dataset.

use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::error::EvaluationError;

/// One labelled example: a diff and the commit message a human wrote for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetRow {
    pub diff: String,
    pub ground_truth: String,
    /// Conventional commit type expected as the subject prefix (`feat`, `fix`, ...).
    pub commit_type: String,
    pub breaking: bool,
}

#[derive(Debug, Deserialize)]
struct RawRow {
    diff: Option<String>,
    ground_truth: Option<String>,
    #[serde(rename = "type")]
    commit_type: Option<String>,
    breaking: Option<bool>,
}

/// Read and parse a dataset file.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Vec<DatasetRow>, EvaluationError> {
    let content = std::fs::read_to_string(path.as_ref()).map_err(EvaluationError::ReadFailed)?;
    parse_dataset(&content)
}

/// Parse dataset text, skipping blank lines and rows that are invalid or
/// incomplete.
pub fn parse_dataset(content: &str) -> Result<Vec<DatasetRow>, EvaluationError> {
    let mut rows = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let raw: RawRow = match serde_json::from_str(line) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Skipping dataset line {}: invalid JSON ({})", idx + 1, e);
                continue;
            }
        };

        match raw {
            RawRow {
                diff: Some(diff),
                ground_truth: Some(ground_truth),
                commit_type: Some(commit_type),
                breaking,
            } => rows.push(DatasetRow {
                diff,
                ground_truth,
                commit_type,
                breaking: breaking.unwrap_or(false),
            }),
            _ => warn!(
                "Skipping dataset line {}: missing diff, ground_truth or type",
                idx + 1
            ),
        }
    }

    if rows.is_empty() {
        return Err(EvaluationError::EmptyDataset);
    }

    Ok(rows)
}
