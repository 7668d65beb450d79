//! Version-control collaborator for relcycle.
//!
//! This crate provides the Git operations a release cycle needs:
//! - Repository discovery and branch inspection (via `git2`)
//! - Echoed system-git invocations for staging and review
//! - Remote revision lookup

mod command;
mod error;
mod repository;

pub use command::{DEFAULT_BRANCH, GitCommand, parse_remote_rev};
pub use error::{GitError, GitResult};
pub use repository::Repository;
