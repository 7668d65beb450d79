//! Version-control seam.

use std::path::PathBuf;

use relcycle_git::GitCommand;

use crate::CoreResult;

/// The version-control operations a release cycle relies on.
///
/// Paths are relative to the repository root.
pub trait VersionControl {
    /// Stages `paths` for the next commit.
    ///
    /// # Errors
    ///
    /// Returns an error if staging fails.
    fn stage_paths(&self, paths: &[PathBuf]) -> CoreResult<()>;

    /// Describes pending changes to `paths` for operator review.
    ///
    /// # Errors
    ///
    /// Returns an error if the working tree cannot be inspected.
    fn review_changes(&self, paths: &[PathBuf]) -> CoreResult<String>;
}

impl VersionControl for GitCommand {
    fn stage_paths(&self, paths: &[PathBuf]) -> CoreResult<()> {
        self.stage(paths)?;
        Ok(())
    }

    fn review_changes(&self, paths: &[PathBuf]) -> CoreResult<String> {
        let mut review = self.short_status()?;
        review.push_str(&self.diff(paths)?);
        Ok(review)
    }
}
