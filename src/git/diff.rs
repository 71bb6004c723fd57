//! Unified diff text for staged changes and the last commit.

use git2::{Diff, DiffFormat, ErrorCode, Repository, Tree};

use crate::error::GitError;

/// Resolve the HEAD tree.
///
/// Returns `Ok(None)` for repos with no commits (unborn branch / not found)
/// and an error for real failures such as a corrupt HEAD.
fn resolve_head_tree(repo: &Repository) -> Result<Option<Tree<'_>>, GitError> {
    let head_ref = match repo.head() {
        Ok(r) => r,
        Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
            return Ok(None);
        }
        Err(e) => return Err(GitError::DiffFailed(e)),
    };

    let tree = head_ref.peel_to_tree().map_err(GitError::DiffFailed)?;
    Ok(Some(tree))
}

/// Diff of the index against HEAD, i.e. what `git diff --cached` shows.
///
/// On a repository without commits every staged file shows as added.
/// Returns an empty string when nothing is staged.
pub fn staged_diff(repo: &Repository) -> Result<String, GitError> {
    let head_tree = resolve_head_tree(repo)?;
    let diff = repo
        .diff_tree_to_index(head_tree.as_ref(), None, None)
        .map_err(GitError::DiffFailed)?;

    patch_text(&diff)
}

/// Diff introduced by the HEAD commit against its first parent.
///
/// A root commit is diffed against the empty tree.
pub fn last_commit_diff(repo: &Repository) -> Result<String, GitError> {
    let head_tree = resolve_head_tree(repo)?.ok_or(GitError::NoCommits)?;
    let head = repo
        .head()
        .and_then(|h| h.peel_to_commit())
        .map_err(GitError::DiffFailed)?;

    let parent_tree = if head.parent_count() > 0 {
        let parent = head.parent(0).map_err(GitError::DiffFailed)?;
        Some(parent.tree().map_err(GitError::DiffFailed)?)
    } else {
        None
    };

    let diff = repo
        .diff_tree_to_tree(parent_tree.as_ref(), Some(&head_tree), None)
        .map_err(GitError::DiffFailed)?;

    patch_text(&diff)
}

/// Render a diff as patch text, keeping the `+`/`-`/` ` origin markers.
fn patch_text(diff: &Diff<'_>) -> Result<String, GitError> {
    let mut text = String::new();

    diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
        let origin = line.origin();
        if origin == '+' || origin == '-' || origin == ' ' {
            text.push(origin);
        }
        text.push_str(&String::from_utf8_lossy(line.content()));
        true
    })
    .map_err(GitError::DiffFailed)?;

    Ok(text)
}
