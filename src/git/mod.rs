//! Git access abstraction layer
//!
//! The workflow only needs the text of the most recent commit, so the
//! abstraction is a single [CommitSource] trait with two implementations:
//!
//! - [repository::Git2Repository]: reads a real repository through `git2`
//! - [mock::MockRepository]: returns canned commits for testing
//!
//! ```rust
//! # use commit_bump::git::{CommitSource, MockRepository};
//! let repo = MockRepository::with_messages(&["fix: handle empty input"]);
//! assert_eq!(repo.latest_commit_text().unwrap(), "fix: handle empty input");
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;

/// Commit information for analysis
#[derive(Debug, Clone, PartialEq)]
pub struct CommitInfo {
    /// The commit hash (shortened)
    pub hash: String,
    /// The full commit message, subject and body
    pub message: String,
    /// The commit author
    pub author: String,
}

impl CommitInfo {
    /// First line of the message.
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or_default()
    }
}

/// Source of the commits that make up the latest change.
///
/// The latest change is what `git log --no-merges HEAD^..HEAD` lists: the
/// `HEAD` commit itself, plus for a merge commit anything it brought in that
/// was not already on the first parent, with merge commits left out.
///
/// ## Error Handling
///
/// Implementations report a missing repository, an unborn `HEAD` or a `HEAD`
/// without a parent as [crate::error::BumpError::Vcs].
pub trait CommitSource {
    /// Commits of the latest change, newest first.
    fn latest_commits(&self) -> Result<Vec<CommitInfo>>;

    /// Messages of the latest change joined by newlines.
    ///
    /// This is the text handed to [crate::conventional::classify].
    fn latest_commit_text(&self) -> Result<String> {
        let commits = self.latest_commits()?;
        Ok(commits
            .iter()
            .map(|c| c.message.trim_end())
            .collect::<Vec<_>>()
            .join("\n"))
    }
}
