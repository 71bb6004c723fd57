//! Git operations using git2-rs.

pub mod commit;
pub mod diff;

use std::path::Path;

use git2::Repository;

use crate::error::GitError;

pub use commit::{amend_head, create_commit};
pub use diff::{last_commit_diff, staged_diff};

/// Open the repository containing `path`, searching parent directories.
pub fn open_repository(path: impl AsRef<Path>) -> Result<Repository, GitError> {
    Repository::discover(path).map_err(GitError::OpenRepository)
}
