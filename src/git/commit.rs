//! Writing generated messages back into the repository.

use git2::{Oid, Repository};

use crate::error::GitError;

/// Commit the current index on HEAD with the given message.
///
/// Only already-staged changes are committed. Works on an unborn branch,
/// in which case the commit has no parent.
pub fn create_commit(repo: &Repository, message: &str) -> Result<Oid, GitError> {
    let mut index = repo.index().map_err(GitError::CommitFailed)?;
    let tree_id = index.write_tree().map_err(GitError::CommitFailed)?;
    let tree = repo.find_tree(tree_id).map_err(GitError::CommitFailed)?;

    // Signature from git config
    let sig = repo.signature().map_err(GitError::ConfigError)?;

    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .map_err(GitError::CommitFailed)
}

/// Replace the message of the HEAD commit, keeping its tree and author.
pub fn amend_head(repo: &Repository, message: &str) -> Result<Oid, GitError> {
    let head = repo
        .head()
        .and_then(|h| h.peel_to_commit())
        .map_err(|_| GitError::NoCommits)?;

    let committer = repo.signature().map_err(GitError::ConfigError)?;

    head.amend(Some("HEAD"), None, Some(&committer), None, Some(message), None)
        .map_err(GitError::CommitFailed)
}
