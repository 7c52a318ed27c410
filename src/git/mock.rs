use crate::error::{BumpError, Result};
use crate::git::{CommitInfo, CommitSource};

/// Mock repository for testing without actual git operations
#[derive(Debug, Clone, Default)]
pub struct MockRepository {
    commits: Vec<CommitInfo>,
    failure: Option<String>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock whose latest change consists of the given messages
    pub fn with_messages(messages: &[&str]) -> Self {
        let mut repo = Self::new();
        for message in messages {
            repo.add_commit(message);
        }
        repo
    }

    /// Create a mock that fails like a repository without history
    pub fn failing(message: impl Into<String>) -> Self {
        MockRepository {
            commits: Vec::new(),
            failure: Some(message.into()),
        }
    }

    /// Add a commit to the latest change
    pub fn add_commit(&mut self, message: &str) {
        let hash = format!("{:07x}", self.commits.len() + 1);
        self.commits.push(CommitInfo {
            hash,
            message: message.to_string(),
            author: "Test Author".to_string(),
        });
    }
}

impl CommitSource for MockRepository {
    fn latest_commits(&self) -> Result<Vec<CommitInfo>> {
        match &self.failure {
            Some(message) => Err(BumpError::vcs(message.clone())),
            None => Ok(self.commits.clone()),
        }
    }
}
