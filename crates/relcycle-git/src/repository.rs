//! Git repository wrapper.

use std::path::Path;

use git2::Repository as Git2Repo;

use crate::{GitCommand, GitError, GitResult};

/// A Git repository wrapper.
pub struct Repository {
    inner: Git2Repo,
}

impl Repository {
    /// Discovers the repository containing the given directory.
    ///
    /// # Errors
    ///
    /// Returns an error if no repository is found.
    pub fn discover(start: impl AsRef<Path>) -> GitResult<Self> {
        let start = start.as_ref();
        let inner =
            Git2Repo::discover(start).map_err(|_| GitError::NotARepo(start.to_path_buf()))?;
        Ok(Self { inner })
    }

    /// Returns the repository root path.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.inner.workdir().unwrap_or_else(|| self.inner.path())
    }

    /// Returns the short name of the checked-out branch.
    ///
    /// Returns `None` for a detached HEAD or a repository without commits.
    pub fn current_branch(&self) -> Option<String> {
        let head = self.inner.head().ok()?;
        if !head.is_branch() {
            return None;
        }
        head.shorthand().map(String::from)
    }

    /// Returns a system-git runner rooted at this work tree.
    #[must_use]
    pub fn command(&self) -> GitCommand {
        GitCommand::new(self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::{Repository as Git2Repository, Signature};
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, Repository) {
        let temp_dir = TempDir::new().unwrap();
        let git2_repo = Git2Repository::init(temp_dir.path()).unwrap();

        let mut config = git2_repo.config().unwrap();
        config.set_str("user.name", "Test User").unwrap();
        config.set_str("user.email", "test@example.com").unwrap();

        let repo = Repository { inner: git2_repo };
        (temp_dir, repo)
    }

    fn create_commit(repo: &Repository, message: &str) {
        let sig = Signature::now("Test User", "test@example.com").unwrap();
        let tree_id = repo.inner.index().unwrap().write_tree().unwrap();
        let tree = repo.inner.find_tree(tree_id).unwrap();

        let parent = repo.inner.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

        repo.inner
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .unwrap();
    }

    #[test]
    fn test_discover_not_a_repo() {
        let temp_dir = TempDir::new().unwrap();
        // A repository above the temp dir would be discovered instead.
        if let Err(err) = Repository::discover(temp_dir.path()) {
            assert!(matches!(err, GitError::NotARepo(p) if p == temp_dir.path()));
        }
    }

    #[test]
    fn test_discover_from_subdirectory() {
        let (temp_dir, _repo) = create_test_repo();
        let nested = temp_dir.path().join("doc").join("source");
        std::fs::create_dir_all(&nested).unwrap();

        let repo = Repository::discover(&nested).unwrap();
        let expected = temp_dir.path().canonicalize().unwrap();
        assert_eq!(repo.path().canonicalize().unwrap(), expected);
    }

    #[test]
    fn test_current_branch_without_commits() {
        let (_temp_dir, repo) = create_test_repo();
        assert!(repo.current_branch().is_none());
    }

    #[test]
    fn test_current_branch_after_commit() {
        let (_temp_dir, repo) = create_test_repo();
        create_commit(&repo, "Initial commit");

        let branch = repo.current_branch().unwrap();
        assert!(branch == "master" || branch == "main", "got {branch}");
    }

    #[test]
    fn test_command_is_rooted_at_workdir() {
        let (temp_dir, repo) = create_test_repo();
        let expected = temp_dir.path().canonicalize().unwrap();
        assert_eq!(repo.command().dir().canonicalize().unwrap(), expected);
    }
}
