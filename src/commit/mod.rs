//! Commit message records, formatting and sensitive-content scanning.

pub mod format;
pub mod message;
pub mod scanner;

pub use format::{FormattedMessage, format_message};
pub use message::{CommitCandidate, CommitMsg, extract_record};
pub use scanner::{SensitiveInfoReport, SensitiveIssue, scan};
