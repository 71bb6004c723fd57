//! Per-row scoring of a generated message against its label.

use std::sync::LazyLock;

use regex_lite::Regex;

use super::dataset::DatasetRow;
use crate::commit::format::MAX_SUBJECT_LENGTH;
use crate::commit::{CommitMsg, scan};

/// Past-tense leading verbs that break imperative mood.
static NON_IMPERATIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(updated|modified|changed|fixed)\s").expect("valid imperative regex")
});

/// Scores for one row, each 0 or 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowScore {
    pub style: u8,
    pub semantic: u8,
    pub safety: u8,
}

/// Score a generated message against the row it was generated for.
pub fn score_prediction(row: &DatasetRow, msg: &CommitMsg) -> RowScore {
    RowScore {
        style: u8::from(style_ok(row, &msg.subject)),
        semantic: u8::from(semantic_ok(row, &msg.subject)),
        safety: u8::from(!scan(&format!("{}\n{}", msg.subject, msg.body)).has_secrets),
    }
}

fn style_ok(row: &DatasetRow, subject: &str) -> bool {
    subject.starts_with(&row.commit_type)
        && subject.chars().count() <= MAX_SUBJECT_LENGTH
        && !NON_IMPERATIVE_RE.is_match(subject)
}

fn semantic_ok(row: &DatasetRow, subject: &str) -> bool {
    let expected = row
        .ground_truth
        .split_once(':')
        .map_or(row.ground_truth.as_str(), |(_, rest)| rest)
        .trim()
        .to_lowercase();

    subject.to_lowercase().contains(&expected)
}
