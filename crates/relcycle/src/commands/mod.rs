//! Subcommand implementations.

pub mod changelog;
pub mod init;
pub mod next;
pub mod notes;
pub mod remote_rev;
pub mod version;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use relcycle_config::{Config, ConfigError, find_and_load_config_from, load_config};
use relcycle_core::{AssumeYes, ChangelogEditor, Operator, ProjectNames, TerminalOperator};
use relcycle_git::{GitCommand, Repository};
use tracing::debug;

/// Options shared by every subcommand.
#[derive(Debug)]
pub struct Options {
    /// Directory the command starts from.
    pub repo: PathBuf,
    /// Explicit configuration file.
    pub config: Option<PathBuf>,
}

impl Options {
    /// Loads the configuration, falling back to defaults when no file exists.
    ///
    /// An explicit `--config` file must exist.
    pub fn load_config(&self, start: &Path) -> Result<Config> {
        if let Some(path) = &self.config {
            return load_config(path)
                .with_context(|| format!("failed to load {}", path.display()));
        }

        match find_and_load_config_from(start) {
            Ok(config) => Ok(config),
            Err(ConfigError::NotFound(path)) => {
                debug!(path = %path.display(), "no configuration file, using defaults");
                Ok(Config::default())
            }
            Err(err) => Err(err).context("failed to load configuration"),
        }
    }

    /// Opens the repository containing [`Options::repo`] and its configuration.
    pub fn open_project(&self) -> Result<Project> {
        let repo = Repository::discover(&self.repo).context("failed to open git repository")?;
        let root = repo.path().to_path_buf();
        let config = self.load_config(&root)?;

        Ok(Project {
            branch: repo.current_branch(),
            git: repo.command(),
            root,
            config,
        })
    }
}

/// A repository work tree and its configuration.
pub struct Project {
    pub root: PathBuf,
    pub config: Config,
    pub branch: Option<String>,
    pub git: GitCommand,
}

impl Project {
    /// Resolves project names, command-line values first.
    pub fn names(&self, package: Option<String>, module: Option<String>) -> Result<ProjectNames> {
        let package = package
            .or_else(|| self.config.project.package.clone())
            .ok_or_else(|| {
                anyhow!("no package name: pass --package or set [project] package in relcycle.toml")
            })?;
        let module = module.or_else(|| self.config.project.module.clone());
        Ok(ProjectNames::new(package, module))
    }

    /// Returns the documentation directory, command-line value first.
    pub fn docs_dir(&self, docs: Option<String>) -> Option<String> {
        docs.or_else(|| self.config.changelog.docs_dir.clone())
    }

    /// Creates a changelog editor for `docs_dir`.
    pub fn changelog_editor(&self, docs_dir: &str) -> ChangelogEditor {
        ChangelogEditor::new(&self.root, docs_dir)
            .with_index_template(self.config.changelog.index_template.clone())
            .with_preview_lines(self.config.changelog.preview_lines)
    }
}

/// Returns the operator answering confirmations.
pub fn operator(assume_yes: bool) -> Box<dyn Operator> {
    if assume_yes {
        Box::new(AssumeYes::stdio())
    } else {
        Box::new(TerminalOperator::stdio())
    }
}
