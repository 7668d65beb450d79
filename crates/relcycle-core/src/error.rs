//! Core error types.

use std::path::PathBuf;

use thiserror::Error;

/// Core-related errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Release name without the dot a short form needs.
    #[error("invalid release name {name:?}: contains {dots} dots")]
    InvalidVersionFormat { name: String, dots: usize },

    /// A required file does not exist.
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The changelog index does not have the expected layout.
    #[error("malformed changelog: {0}")]
    MalformedChangelog(String),

    /// Template rendering failed.
    #[error("template error: {0}")]
    Template(String),

    /// The operator declined a confirmation.
    #[error("aborted by operator: {0}")]
    UserAborted(String),

    /// Version-control error.
    #[error("git error: {0}")]
    Git(#[from] relcycle_git::GitError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::InvalidVersionFormat {
            name: "1".to_string(),
            dots: 0,
        };
        assert_eq!(err.to_string(), "invalid release name \"1\": contains 0 dots");

        let err = CoreError::FileNotFound(PathBuf::from("doc/changes.rst"));
        assert_eq!(err.to_string(), "file not found: doc/changes.rst");

        let err = CoreError::UserAborted("Does the full changelog look right?".to_string());
        assert_eq!(
            err.to_string(),
            "aborted by operator: Does the full changelog look right?"
        );
    }

    #[test]
    fn test_from_git_error() {
        let err: CoreError = relcycle_git::GitError::RevisionNotFound {
            url: "origin".to_string(),
            branch: "refs/heads/master".to_string(),
        }
        .into();
        assert!(matches!(err, CoreError::Git(_)));
    }
}
