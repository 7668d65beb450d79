//! Release orchestration.

use std::path::PathBuf;

use relcycle_config::Config;
use tracing::info;

use crate::changelog::{ChangelogEditor, ChangelogUpdate};
use crate::updater::{ProjectNames, VersionUpdater};
use crate::{CoreResult, Operator, VersionControl};

/// What a release run changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseOutcome {
    /// Changelog result, `None` when no documentation directory is configured.
    pub changelog: Option<ChangelogUpdate>,
    /// Development version written to the declaration files.
    pub dev_version: String,
}

/// Prepares a repository for a new release cycle.
///
/// Records the release in the changelog, then moves the version
/// declarations to the matching development version. Changes are staged
/// but never committed or pushed, so the run is safe on a branch that is
/// not ready to merge.
#[derive(Debug, Clone)]
pub struct ReleaseOrchestrator {
    names: ProjectNames,
    changelog: Option<ChangelogEditor>,
    updater: VersionUpdater,
    dev_suffix: String,
}

impl ReleaseOrchestrator {
    /// Creates an orchestrator from its parts.
    pub fn new(
        names: ProjectNames,
        changelog: Option<ChangelogEditor>,
        updater: VersionUpdater,
        dev_suffix: impl Into<String>,
    ) -> Self {
        Self {
            names,
            changelog,
            updater,
            dev_suffix: dev_suffix.into(),
        }
    }

    /// Creates an orchestrator for the repository at `repo_dir`.
    pub fn from_config(repo_dir: impl Into<PathBuf>, names: ProjectNames, config: &Config) -> Self {
        let repo_dir = repo_dir.into();

        let changelog = config.changelog.docs_dir.as_ref().map(|docs_dir| {
            ChangelogEditor::new(&repo_dir, docs_dir)
                .with_index_template(config.changelog.index_template.clone())
                .with_preview_lines(config.changelog.preview_lines)
        });
        let updater = VersionUpdater::new(repo_dir, config.version.files.clone())
            .with_line_ending(config.version.line_ending.clone());

        Self::new(names, changelog, updater, config.version.dev_suffix.clone())
    }

    /// Returns the development version following `release_name`.
    pub fn dev_release_name(&self, release_name: &str) -> String {
        format!("{release_name}{}", self.dev_suffix)
    }

    /// Runs the release cycle for `release_name`.
    ///
    /// # Errors
    ///
    /// Stops at the first failing step. A rejected review returns
    /// [`crate::CoreError::UserAborted`] with the earlier steps' changes
    /// already staged.
    pub fn add_release(
        &self,
        release_name: &str,
        operator: &mut dyn Operator,
        vcs: &dyn VersionControl,
    ) -> CoreResult<ReleaseOutcome> {
        info!(release = release_name, package = %self.names.package, "adding release");

        let changelog = match &self.changelog {
            Some(editor) => Some(editor.update(release_name, operator, vcs)?),
            None => {
                info!("no documentation directory configured, skipping changelog");
                None
            }
        };

        let dev_name = self.dev_release_name(release_name);
        let dev_version = self.updater.update(&dev_name, &self.names, operator, vcs)?;

        info!(%dev_version, "release prepared, changes staged but not committed");
        Ok(ReleaseOutcome {
            changelog,
            dev_version,
        })
    }
}
