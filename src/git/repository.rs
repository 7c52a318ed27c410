use crate::error::{BumpError, Result};
use crate::git::{CommitInfo, CommitSource};
use git2::{Commit, Repository as Git2Repo};
use std::path::Path;
use tracing::debug;

const SHORT_HASH_LEN: usize = 7;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = Git2Repo::discover(path).map_err(|e| {
            BumpError::vcs(format!(
                "Not in a git repository ({}): {}",
                path.display(),
                e.message()
            ))
        })?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    fn head_commit(&self) -> Result<Commit<'_>> {
        let head = self
            .repo
            .head()
            .map_err(|e| BumpError::vcs(format!("Cannot resolve HEAD: {}", e.message())))?;

        head.peel_to_commit()
            .map_err(|e| BumpError::vcs(format!("HEAD does not point to a commit: {}", e.message())))
    }
}

fn commit_info(commit: &Commit<'_>) -> CommitInfo {
    let hash = commit.id().to_string();
    CommitInfo {
        hash: hash[..SHORT_HASH_LEN.min(hash.len())].to_string(),
        message: String::from_utf8_lossy(commit.message_bytes()).into_owned(),
        author: commit.author().name().unwrap_or("unknown").to_string(),
    }
}

impl CommitSource for Git2Repository {
    fn latest_commits(&self) -> Result<Vec<CommitInfo>> {
        let head = self.head_commit()?;
        if head.parent_count() == 0 {
            return Err(BumpError::vcs(format!(
                "HEAD ({}) has no parent commit to compare against",
                commit_info(&head).hash
            )));
        }

        let mut revwalk = self.repo.revwalk()?;
        revwalk.push(head.id())?;
        revwalk.hide(head.parent_id(0)?)?;

        let mut commits = Vec::new();
        for oid_result in revwalk {
            let commit = self.repo.find_commit(oid_result?)?;
            if commit.parent_count() > 1 {
                debug!(commit = %commit.id(), "skipping merge commit");
                continue;
            }
            let info = commit_info(&commit);
            debug!(commit = %info.hash, author = %info.author, summary = info.summary(), "latest change");
            commits.push(info);
        }

        debug!(count = commits.len(), "collected latest commits");
        Ok(commits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::{Oid, Signature};
    use tempfile::TempDir;

    fn init_repo() -> (TempDir, Git2Repo) {
        let dir = tempfile::tempdir().unwrap();
        let repo = Git2Repo::init(dir.path()).unwrap();
        (dir, repo)
    }

    fn commit(repo: &Git2Repo, message: &str, parents: &[Oid]) -> Oid {
        let sig = Signature::now("Test", "test@test.com").unwrap();
        let tree_id = repo.index().unwrap().write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let parents: Vec<Commit> = parents
            .iter()
            .map(|oid| repo.find_commit(*oid).unwrap())
            .collect();
        let parent_refs: Vec<&Commit> = parents.iter().collect();
        repo.commit(None, &sig, &sig, message, &tree, &parent_refs)
            .unwrap()
    }

    fn set_head(repo: &Git2Repo, oid: Oid) {
        repo.reference("refs/heads/main", oid, true, "test").unwrap();
        repo.set_head("refs/heads/main").unwrap();
    }

    #[test]
    fn test_latest_commit_only() {
        let (_dir, repo) = init_repo();
        let first = commit(&repo, "feat: initial", &[]);
        let second = commit(&repo, "fix: second\n\nwith body", &[first]);
        set_head(&repo, second);

        let source = Git2Repository::from_git2(repo);
        let commits = source.latest_commits().unwrap();
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].summary(), "fix: second");
        assert_eq!(commits[0].hash.len(), SHORT_HASH_LEN);
        assert_eq!(commits[0].author, "Test");
        assert_eq!(
            source.latest_commit_text().unwrap(),
            "fix: second\n\nwith body"
        );
    }

    #[test]
    fn test_root_commit_is_an_error() {
        let (_dir, repo) = init_repo();
        let only = commit(&repo, "feat: initial", &[]);
        set_head(&repo, only);

        let err = Git2Repository::from_git2(repo)
            .latest_commits()
            .unwrap_err();
        assert!(matches!(err, BumpError::Vcs(_)));
        assert!(err.to_string().contains("no parent"));
    }

    #[test]
    fn test_unborn_head_is_an_error() {
        let (_dir, repo) = init_repo();
        let err = Git2Repository::from_git2(repo)
            .latest_commits()
            .unwrap_err();
        assert!(matches!(err, BumpError::Vcs(_)));
    }

    #[test]
    fn test_merge_commit_is_skipped_but_branch_commits_count() {
        let (_dir, repo) = init_repo();
        let base = commit(&repo, "chore: base", &[]);
        let mainline = commit(&repo, "docs: mainline", &[base]);
        let topic = commit(&repo, "feat: from topic", &[base]);
        let merge = commit(&repo, "Merge branch 'topic' fix: not counted", &[mainline, topic]);
        set_head(&repo, merge);

        let source = Git2Repository::from_git2(repo);
        let commits = source.latest_commits().unwrap();
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].summary(), "feat: from topic");
    }

    #[test]
    fn test_open_outside_repository() {
        let dir = tempfile::tempdir().unwrap();
        // A fresh temp dir may still sit below some repository on the host,
        // so only check that failures are reported as version control errors.
        if let Err(err) = Git2Repository::open(dir.path()) {
            assert!(matches!(err, BumpError::Vcs(_)));
        }
    }
}
