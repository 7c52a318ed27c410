use thiserror::Error;

/// Unified error type for commit-bump operations
#[derive(Error, Debug)]
pub enum BumpError {
    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("Version control error: {0}")]
    Vcs(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Version parsing error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in commit-bump
pub type Result<T> = std::result::Result<T, BumpError>;

impl BumpError {
    /// Create a manifest error with context
    pub fn manifest(msg: impl Into<String>) -> Self {
        BumpError::Manifest(msg.into())
    }

    /// Create a version control error with context
    pub fn vcs(msg: impl Into<String>) -> Self {
        BumpError::Vcs(msg.into())
    }

    /// Create a version parsing error with context
    pub fn parse(msg: impl Into<String>) -> Self {
        BumpError::Parse(msg.into())
    }
}
