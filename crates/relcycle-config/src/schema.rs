//! Configuration schema.

use serde::{Deserialize, Serialize};

/// Section inserted into the changelog index for a new release.
///
/// Placeholders: `{title}`, `{underline}`, `{fname}`.
pub const DEFAULT_INDEX_TEMPLATE: &str = "{title}
{underline}

.. include:: ./changes/{fname}


";

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Project naming.
    #[serde(default)]
    pub project: ProjectConfig,

    /// Changelog configuration.
    #[serde(default)]
    pub changelog: ChangelogConfig,

    /// Version declaration configuration.
    #[serde(default)]
    pub version: VersionConfig,

    /// Remote repository configuration.
    #[serde(default)]
    pub remote: RemoteConfig,
}

/// Project naming, used to locate version-declaration files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Distribution package name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,

    /// Importable module name (defaults to the package name).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
}

/// Changelog configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangelogConfig {
    /// Documentation source directory holding `changes.rst` and `changes/`,
    /// relative to the repository root. No directory, no changelog update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs_dir: Option<String>,

    /// Template for a new index section.
    #[serde(default = "default_index_template")]
    pub index_template: String,

    /// Number of index lines shown for review after the update.
    #[serde(default = "default_preview_lines")]
    pub preview_lines: usize,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            docs_dir: None,
            index_template: default_index_template(),
            preview_lines: default_preview_lines(),
        }
    }
}

fn default_index_template() -> String {
    DEFAULT_INDEX_TEMPLATE.to_string()
}

fn default_preview_lines() -> usize {
    20
}

/// Version declaration configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionConfig {
    /// Suffix appended to the release name for the development version.
    #[serde(default = "default_dev_suffix")]
    pub dev_suffix: String,

    /// Line ending written after each replaced line.
    #[serde(default = "default_line_ending")]
    pub line_ending: String,

    /// Files declaring the project version.
    #[serde(default = "default_version_files")]
    pub files: Vec<VersionFile>,
}

impl Default for VersionConfig {
    fn default() -> Self {
        Self {
            dev_suffix: default_dev_suffix(),
            line_ending: default_line_ending(),
            files: default_version_files(),
        }
    }
}

fn default_dev_suffix() -> String {
    "-dev".to_string()
}

fn default_line_ending() -> String {
    "\n".to_string()
}

fn default_version_files() -> Vec<VersionFile> {
    vec![
        VersionFile::new(
            "condarecipe/{package}/meta.yaml",
            [
                ("version: ", "  version: {version}"),
                ("git_tag: ", "  git_tag: {version}"),
            ],
        ),
        VersionFile::new(
            "{module}/__init__.py",
            [("__version__ =", "__version__ = '{version}'")],
        ),
        VersionFile::new("setup.py", [("VERSION =", "VERSION = '{version}'")]),
    ]
}

/// A file declaring the project version and how to rewrite it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionFile {
    /// Path relative to the repository root. Accepts `{package}` and `{module}`.
    pub path: String,

    /// Ordered line substitutions.
    #[serde(default)]
    pub changes: Vec<LineChange>,
}

impl VersionFile {
    /// Creates a version file entry from `(find, replace)` pairs.
    pub fn new<'a>(
        path: impl Into<String>,
        changes: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        Self {
            path: path.into(),
            changes: changes
                .into_iter()
                .map(|(find, replace)| LineChange {
                    find: find.to_string(),
                    replace: replace.to_string(),
                })
                .collect(),
        }
    }
}

/// Replace every line containing `find` with `replace`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineChange {
    /// Substring identifying the line.
    pub find: String,

    /// Replacement line (without line ending). Accepts `{version}`.
    pub replace: String,
}

/// Remote repository configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Remote URL queried by `remote-rev`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Branch ref queried by `remote-rev`.
    #[serde(default = "default_branch")]
    pub branch: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            url: None,
            branch: default_branch(),
        }
    }
}

fn default_branch() -> String {
    "refs/heads/master".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.project.package.is_none());
        assert!(config.changelog.docs_dir.is_none());
        assert_eq!(config.changelog.preview_lines, 20);
        assert_eq!(config.version.dev_suffix, "-dev");
        assert_eq!(config.version.line_ending, "\n");
        assert_eq!(config.version.files.len(), 3);
        assert_eq!(config.remote.branch, "refs/heads/master");
    }

    #[test]
    fn test_default_index_template_layout() {
        let lines: Vec<&str> = DEFAULT_INDEX_TEMPLATE.split('\n').collect();
        assert_eq!(
            lines,
            [
                "{title}",
                "{underline}",
                "",
                ".. include:: ./changes/{fname}",
                "",
                "",
                ""
            ]
        );
    }

    #[test]
    fn test_default_version_files() {
        let files = VersionConfig::default().files;
        assert_eq!(files[0].path, "condarecipe/{package}/meta.yaml");
        assert_eq!(files[0].changes.len(), 2);
        assert_eq!(files[1].path, "{module}/__init__.py");
        assert_eq!(files[1].changes[0].find, "__version__ =");
        assert_eq!(files[2].path, "setup.py");
        assert_eq!(files[2].changes[0].replace, "VERSION = '{version}'");
    }

    #[test]
    fn test_deserialize_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.version.files.len(), 3);
        assert_eq!(config.changelog.index_template, DEFAULT_INDEX_TEMPLATE);
    }

    #[test]
    fn test_deserialize_full() {
        let toml = r#"
            [project]
            package = "larray"
            module = "larray"

            [changelog]
            docs_dir = "doc/source"
            preview_lines = 10

            [version]
            dev_suffix = ".dev0"

            [[version.files]]
            path = "pyproject.toml"
            changes = [{ find = "version =", replace = "version = \"{version}\"" }]

            [remote]
            url = "https://github.com/larray-project/larray.git"
            branch = "refs/heads/main"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.project.package.as_deref(), Some("larray"));
        assert_eq!(config.changelog.docs_dir.as_deref(), Some("doc/source"));
        assert_eq!(config.changelog.preview_lines, 10);
        assert_eq!(config.version.dev_suffix, ".dev0");
        assert_eq!(
            config.version.files,
            vec![VersionFile::new(
                "pyproject.toml",
                [("version =", "version = \"{version}\"")]
            )]
        );
        assert_eq!(config.remote.branch, "refs/heads/main");
    }

    #[test]
    fn test_explicit_empty_files_list() {
        let config: Config = toml::from_str("[version]\nfiles = []\n").unwrap();
        assert!(config.version.files.is_empty());
    }

    #[test]
    fn test_serialize_roundtrips_defaults() {
        let rendered = toml::to_string_pretty(&Config::default()).unwrap();
        let parsed: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.changelog.index_template, DEFAULT_INDEX_TEMPLATE);
        assert_eq!(parsed.version.files, VersionConfig::default().files);
    }
}
