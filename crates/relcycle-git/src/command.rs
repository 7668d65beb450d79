//! System git invocations.
//!
//! Every command runs with an explicit working directory; nothing here
//! touches the process-wide current directory.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, error, info};

use crate::{GitError, GitResult};

/// Branch queried by [`GitCommand::remote_last_rev`] when none is given.
pub const DEFAULT_BRANCH: &str = "refs/heads/master";

/// Runs `git` subcommands inside a fixed directory.
#[derive(Debug, Clone)]
pub struct GitCommand {
    dir: PathBuf,
}

impl GitCommand {
    /// Creates a runner rooted at `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the directory commands run in.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Runs `git <args>` and returns its combined output.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::CommandFailed`] if git exits non-zero, after
    /// logging the captured output.
    pub fn call<I, S>(&self, args: I) -> GitResult<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args: Vec<S> = args.into_iter().collect();
        let command = command_line(&args);
        debug!(%command, dir = %self.dir.display(), "running git");

        let output = Command::new("git")
            .args(&args)
            .current_dir(&self.dir)
            .output()?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        if !output.status.success() {
            error!(%command, output = %combined, "git command failed");
            return Err(GitError::CommandFailed {
                command,
                status: output.status.to_string(),
                output: combined,
            });
        }

        Ok(combined)
    }

    /// Like [`call`](Self::call), but announces the command first.
    ///
    /// # Errors
    ///
    /// Same as [`call`](Self::call).
    pub fn echocall<I, S>(&self, args: I) -> GitResult<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args: Vec<S> = args.into_iter().collect();
        info!("{}", command_line(&args));
        self.call(args)
    }

    /// Stages the given paths.
    ///
    /// # Errors
    ///
    /// Returns an error if `git add` fails.
    pub fn stage<P: AsRef<Path>>(&self, paths: &[P]) -> GitResult<()> {
        let mut args = vec![OsStr::new("add")];
        args.extend(paths.iter().map(|p| p.as_ref().as_os_str()));
        self.echocall(args)?;
        Ok(())
    }

    /// Returns `git status -s` output.
    ///
    /// # Errors
    ///
    /// Returns an error if git fails.
    pub fn short_status(&self) -> GitResult<String> {
        self.echocall(["status", "-s"])
    }

    /// Returns the working tree diff restricted to `paths`.
    ///
    /// # Errors
    ///
    /// Returns an error if git fails.
    pub fn diff<P: AsRef<Path>>(&self, paths: &[P]) -> GitResult<String> {
        let mut args = vec![OsStr::new("diff")];
        args.extend(paths.iter().map(|p| p.as_ref().as_os_str()));
        self.echocall(args)
    }

    /// Returns the hash of the last revision of `branch` on the remote `url`.
    ///
    /// `branch` defaults to [`DEFAULT_BRANCH`].
    ///
    /// # Errors
    ///
    /// Returns an error if `git ls-remote` fails or reports no line for the branch.
    pub fn remote_last_rev(&self, url: &str, branch: Option<&str>) -> GitResult<String> {
        let branch = branch.unwrap_or(DEFAULT_BRANCH);
        let output = self.call(["ls-remote", url, branch])?;

        parse_remote_rev(&output, branch).ok_or_else(|| GitError::RevisionNotFound {
            url: url.to_string(),
            branch: branch.to_string(),
        })
    }
}

/// Extracts the revision hash for `branch` from `git ls-remote` output.
///
/// The hash is the first whitespace-separated token of the first line
/// ending with the branch ref.
pub fn parse_remote_rev(output: &str, branch: &str) -> Option<String> {
    output
        .lines()
        .find(|line| line.ends_with(branch))
        .and_then(|line| line.split_whitespace().next())
        .map(String::from)
}

fn command_line<S: AsRef<OsStr>>(args: &[S]) -> String {
    let mut line = String::from("git");
    for arg in args {
        line.push(' ');
        line.push_str(&arg.as_ref().to_string_lossy());
    }
    line
}
