//! Version-declaration updates.

use std::path::PathBuf;

use relcycle_config::VersionFile;
use tracing::{debug, info};

use crate::patch::replace_lines;
use crate::template::render;
use crate::version::short;
use crate::{CoreError, CoreResult, Operator, VersionControl};

const REVIEW_QUESTION: &str = "Do the version update changes look right?";

/// Names substituted into declaration paths and replacements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectNames {
    /// Distribution package name.
    pub package: String,
    /// Importable module name.
    pub module: String,
}

impl ProjectNames {
    /// Creates names where the module defaults to the package name.
    pub fn new(package: impl Into<String>, module: Option<String>) -> Self {
        let package = package.into();
        let module = module.unwrap_or_else(|| package.clone());
        Self { package, module }
    }
}

/// Rewrites the files declaring the project version.
#[derive(Debug, Clone)]
pub struct VersionUpdater {
    repo_dir: PathBuf,
    files: Vec<VersionFile>,
    line_ending: String,
}

impl VersionUpdater {
    /// Creates an updater for `files`, relative to `repo_dir`.
    pub fn new(repo_dir: impl Into<PathBuf>, files: Vec<VersionFile>) -> Self {
        Self {
            repo_dir: repo_dir.into(),
            files,
            line_ending: "\n".to_string(),
        }
    }

    /// Sets the line ending written after replaced lines.
    #[must_use]
    pub fn with_line_ending(mut self, line_ending: impl Into<String>) -> Self {
        self.line_ending = line_ending.into();
        self
    }

    /// Returns the declaration paths for `names`, relative to the repository.
    ///
    /// # Errors
    ///
    /// Returns an error if a path template names an unknown placeholder.
    pub fn resolve_paths(&self, names: &ProjectNames) -> CoreResult<Vec<PathBuf>> {
        self.files
            .iter()
            .map(|file| {
                render(
                    &file.path,
                    &[
                        ("package", names.package.as_str()),
                        ("module", names.module.as_str()),
                    ],
                )
                .map(PathBuf::from)
            })
            .collect()
    }

    /// Writes `release_name` into every declaration file.
    ///
    /// The files are patched, shown for review and staged once the operator
    /// approves. Returns the version written, i.e. the short form of
    /// `release_name`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::FileNotFound`] for a missing declaration file and
    /// [`CoreError::UserAborted`] if the operator rejects the changes; the
    /// files are then left patched but unstaged.
    pub fn update(
        &self,
        release_name: &str,
        names: &ProjectNames,
        operator: &mut dyn Operator,
        vcs: &dyn VersionControl,
    ) -> CoreResult<String> {
        let version = short(release_name);
        let values = [
            ("package", names.package.as_str()),
            ("module", names.module.as_str()),
            ("version", version),
        ];

        let paths = self.resolve_paths(names)?;
        for (file, path) in self.files.iter().zip(&paths) {
            let changes = file
                .changes
                .iter()
                .map(|change| Ok((change.find.as_str(), render(&change.replace, &values)?)))
                .collect::<CoreResult<Vec<_>>>()?;

            let replaced = replace_lines(&self.repo_dir.join(path), &changes, &self.line_ending)?;
            debug!(path = %path.display(), replaced, "updated version declaration");
        }

        operator.show(&vcs.review_changes(&paths)?)?;
        if !operator.confirm(REVIEW_QUESTION, false)? {
            return Err(CoreError::UserAborted(REVIEW_QUESTION.to_string()));
        }

        vcs.stage_paths(&paths)?;
        info!(%version, files = paths.len(), "version declarations updated");
        Ok(version.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator::testing::ScriptedOperator;
    use crate::vcs::testing::RecordingVcs;
    use relcycle_config::VersionConfig;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn names() -> ProjectNames {
        ProjectNames::new("larray", None)
    }

    fn project() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("condarecipe/larray")).unwrap();
        fs::create_dir_all(root.join("larray")).unwrap();
        fs::write(
            root.join("condarecipe/larray/meta.yaml"),
            "package:\n  name: larray\n  version: 0.8\n\nsource:\n  git_tag: 0.8\n",
        )
        .unwrap();
        fs::write(
            root.join("larray/__init__.py"),
            "# __version__ = 'unused'\n__version__ = '0.8'\n",
        )
        .unwrap();
        fs::write(root.join("setup.py"), "VERSION = '0.8'\nname = 'larray'\n").unwrap();
        temp_dir
    }

    fn read(root: &Path, path: &str) -> String {
        fs::read_to_string(root.join(path)).unwrap()
    }

    #[test]
    fn test_project_names_module_defaults_to_package() {
        assert_eq!(names().module, "larray");
        assert_eq!(
            ProjectNames::new("larray-editor", Some("larray_editor".to_string())).module,
            "larray_editor"
        );
    }

    #[test]
    fn test_resolve_paths() {
        let updater = VersionUpdater::new("/repo", VersionConfig::default().files);
        let names = ProjectNames::new("larray-editor", Some("larray_editor".to_string()));
        assert_eq!(
            updater.resolve_paths(&names).unwrap(),
            [
                PathBuf::from("condarecipe/larray-editor/meta.yaml"),
                PathBuf::from("larray_editor/__init__.py"),
                PathBuf::from("setup.py"),
            ]
        );
    }

    #[test]
    fn test_update_patches_and_stages() {
        let temp_dir = project();
        let root = temp_dir.path();
        let updater = VersionUpdater::new(root, VersionConfig::default().files);
        let mut operator = ScriptedOperator::answering([true]);
        let vcs = RecordingVcs::default();

        let version = updater
            .update("0.9-dev", &names(), &mut operator, &vcs)
            .unwrap();

        assert_eq!(version, "0.9-dev");
        assert_eq!(
            read(root, "condarecipe/larray/meta.yaml"),
            "package:\n  name: larray\n  version: 0.9-dev\n\nsource:\n  git_tag: 0.9-dev\n"
        );
        assert_eq!(
            read(root, "larray/__init__.py"),
            "# __version__ = 'unused'\n__version__ = '0.9-dev'\n"
        );
        assert_eq!(read(root, "setup.py"), "VERSION = '0.9-dev'\nname = 'larray'\n");

        assert_eq!(operator.shown, ["3 file(s) changed\n"]);
        assert_eq!(operator.questions, [REVIEW_QUESTION]);
        assert_eq!(vcs.staged.borrow().len(), 3);
    }

    #[test]
    fn test_update_writes_short_version() {
        let temp_dir = project();
        let root = temp_dir.path();
        let files = vec![VersionFile::new("setup.py", [("VERSION =", "VERSION = '{version}'")])];
        let updater = VersionUpdater::new(root, files);

        let version = updater
            .update(
                "1.0",
                &names(),
                &mut ScriptedOperator::answering([true]),
                &RecordingVcs::default(),
            )
            .unwrap();

        assert_eq!(version, "1");
        assert_eq!(read(root, "setup.py"), "VERSION = '1'\nname = 'larray'\n");
    }

    #[test]
    fn test_rejected_update_is_not_staged() {
        let temp_dir = project();
        let updater = VersionUpdater::new(temp_dir.path(), VersionConfig::default().files);
        let vcs = RecordingVcs::default();

        let err = updater
            .update("0.9-dev", &names(), &mut ScriptedOperator::answering([false]), &vcs)
            .unwrap_err();

        assert!(matches!(err, CoreError::UserAborted(_)));
        assert!(vcs.staged.borrow().is_empty());
        assert_eq!(read(temp_dir.path(), "setup.py"), "VERSION = '0.9-dev'\nname = 'larray'\n");
    }

    #[test]
    fn test_missing_declaration_file() {
        let temp_dir = project();
        fs::remove_file(temp_dir.path().join("setup.py")).unwrap();
        let updater = VersionUpdater::new(temp_dir.path(), VersionConfig::default().files);

        let err = updater
            .update(
                "0.9-dev",
                &names(),
                &mut ScriptedOperator::default(),
                &RecordingVcs::default(),
            )
            .unwrap_err();
        assert!(matches!(err, CoreError::FileNotFound(p) if p.ends_with("setup.py")));
    }

    #[test]
    fn test_unknown_placeholder_in_replacement() {
        let temp_dir = project();
        let files = vec![VersionFile::new("setup.py", [("VERSION =", "VERSION = '{release}'")])];
        let updater = VersionUpdater::new(temp_dir.path(), files);

        let err = updater
            .update(
                "0.9",
                &names(),
                &mut ScriptedOperator::default(),
                &RecordingVcs::default(),
            )
            .unwrap_err();
        assert!(matches!(err, CoreError::Template(_)));
    }
}
