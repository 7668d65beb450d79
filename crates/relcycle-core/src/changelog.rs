//! Changelog index maintenance.
//!
//! The documentation tree holds an index document listing every release,
//! most recent first, and one change-notes file per release:
//!
//! ```text
//! <docs_dir>/changes.rst
//! <docs_dir>/changes/template.rst.inc
//! <docs_dir>/changes/version_0_8.rst.inc
//! ```
//!
//! The index starts with a fixed header of [`HEADER_LINES`] lines. Each
//! section is a `Version <short name>` title, an `=` underline at least as
//! long and an `.. include::` of the release's notes file.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::files::{not_found_or_io, read_text, read_text_strip_bom, write_text};
use crate::template::render;
use crate::version::{notes_file_name, short};
use crate::{CoreError, CoreResult, Operator, VersionControl};

/// Name of the changelog index inside the documentation directory.
pub const INDEX_FILE_NAME: &str = "changes.rst";

/// Directory holding the per-release notes files.
pub const NOTES_DIR_NAME: &str = "changes";

/// Notes file copied for each new release.
pub const NOTES_TEMPLATE_NAME: &str = "template.rst.inc";

/// Number of lines reserved for the index header.
pub const HEADER_LINES: usize = 3;

const REVIEW_QUESTION: &str = "Does the full changelog look right?";

/// A changelog index split into its header and the sections below it.
///
/// Lines keep their original endings, so an unmodified document renders
/// back byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogDocument {
    header: Vec<String>,
    body: Vec<String>,
}

impl ChangelogDocument {
    /// Parses an index document.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MalformedChangelog`] if the text is shorter than
    /// the header.
    pub fn parse(text: &str) -> CoreResult<Self> {
        let mut lines = text.split_inclusive('\n').map(String::from);
        let header: Vec<String> = lines.by_ref().take(HEADER_LINES).collect();

        if header.len() < HEADER_LINES {
            return Err(CoreError::MalformedChangelog(format!(
                "expected a {HEADER_LINES}-line header, found {} line(s)",
                header.len()
            )));
        }

        Ok(Self {
            header,
            body: lines.collect(),
        })
    }

    /// Returns the header lines.
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Returns the section titles, most recent first.
    pub fn section_titles(&self) -> impl Iterator<Item = &str> {
        self.body.windows(2).filter_map(|pair| {
            let title = strip_eol(&pair[0]);
            is_section_title(title, strip_eol(&pair[1])).then_some(title)
        })
    }

    /// Returns the title of the most recent section.
    pub fn latest_title(&self) -> Option<&str> {
        self.section_titles().next()
    }

    /// Inserts rendered section text right below the header.
    pub fn insert_section(&mut self, section: &str) {
        let mut body: Vec<String> = section.split_inclusive('\n').map(String::from).collect();
        body.append(&mut self.body);
        self.body = body;
    }
}

impl fmt::Display for ChangelogDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.header.iter().chain(&self.body) {
            f.write_str(line)?;
        }
        Ok(())
    }
}

fn strip_eol(line: &str) -> &str {
    line.trim_end_matches(['\r', '\n'])
}

fn is_section_title(title: &str, underline: &str) -> bool {
    let is_rule = |s: &str| !s.is_empty() && s.chars().all(|c| c == '=');
    !title.trim().is_empty()
        && !is_rule(title)
        && is_rule(underline)
        && underline.chars().count() >= title.chars().count()
}

/// Result of a changelog update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangelogUpdate {
    /// The index already starts with this release; nothing was changed.
    AlreadyPresent {
        /// The section title found.
        title: String,
    },
    /// A section was added and both files were staged.
    Added {
        /// Index path, relative to the repository.
        index: PathBuf,
        /// Notes file path, relative to the repository.
        notes: PathBuf,
    },
}

/// Adds release sections to a changelog index.
#[derive(Debug, Clone)]
pub struct ChangelogEditor {
    repo_dir: PathBuf,
    docs_dir: PathBuf,
    index_template: String,
    preview_lines: usize,
}

impl ChangelogEditor {
    /// Creates an editor for `docs_dir`, relative to `repo_dir`.
    pub fn new(repo_dir: impl Into<PathBuf>, docs_dir: impl Into<PathBuf>) -> Self {
        Self {
            repo_dir: repo_dir.into(),
            docs_dir: docs_dir.into(),
            index_template: relcycle_config::DEFAULT_INDEX_TEMPLATE.to_string(),
            preview_lines: 20,
        }
    }

    /// Sets the template used for new sections.
    ///
    /// Placeholders: `{title}`, `{underline}`, `{fname}`.
    #[must_use]
    pub fn with_index_template(mut self, template: impl Into<String>) -> Self {
        self.index_template = template.into();
        self
    }

    /// Sets how many index lines are shown for review.
    #[must_use]
    pub fn with_preview_lines(mut self, lines: usize) -> Self {
        self.preview_lines = lines;
        self
    }

    /// Index path, relative to the repository.
    pub fn index_path(&self) -> PathBuf {
        self.docs_dir.join(INDEX_FILE_NAME)
    }

    /// Notes file path for `release`, relative to the repository.
    pub fn notes_path(&self, release: &str) -> PathBuf {
        self.docs_dir
            .join(NOTES_DIR_NAME)
            .join(notes_file_name(release))
    }

    /// Renders the index section for `release`.
    ///
    /// # Errors
    ///
    /// Returns an error if the index template is invalid.
    pub fn render_section(&self, release: &str) -> CoreResult<String> {
        let title = section_title(release);
        let underline = "=".repeat(title.chars().count());
        let fname = notes_file_name(release);

        render(
            &self.index_template,
            &[
                ("title", title.as_str()),
                ("underline", underline.as_str()),
                ("fname", fname.as_str()),
            ],
        )
    }

    /// Creates the notes file for `release` from the notes template.
    ///
    /// An existing notes file is kept as is. Returns its path relative to
    /// the repository.
    ///
    /// # Errors
    ///
    /// Returns an error if the template is missing or the copy fails.
    pub fn create_notes(&self, release: &str) -> CoreResult<PathBuf> {
        let notes = self.notes_path(release);
        let target = self.repo_dir.join(&notes);

        if target.exists() {
            info!(path = %notes.display(), "notes file already exists, keeping it");
            return Ok(notes);
        }

        let template = self
            .repo_dir
            .join(&self.docs_dir)
            .join(NOTES_DIR_NAME)
            .join(NOTES_TEMPLATE_NAME);
        if !template.is_file() {
            return Err(CoreError::FileNotFound(template));
        }

        fs::copy(&template, &target).map_err(|err| not_found_or_io(&target, err))?;
        info!(path = %notes.display(), "created notes file");
        Ok(notes)
    }

    /// Inserts the section for `release` at the top of the index.
    ///
    /// Returns `false` without touching the file when the most recent
    /// section already carries the release title.
    ///
    /// # Errors
    ///
    /// Returns an error if the index cannot be read, parsed or written.
    pub fn splice_index(&self, release: &str) -> CoreResult<bool> {
        let path = self.repo_dir.join(self.index_path());
        let mut document = ChangelogDocument::parse(&read_text(&path)?)?;

        let title = section_title(release);
        if document.latest_title() == Some(title.as_str()) {
            return Ok(false);
        }

        document.insert_section(&self.render_section(release)?);
        write_text(&path, &document.to_string())?;
        debug!(path = %path.display(), %title, "inserted changelog section");
        Ok(true)
    }

    /// Returns the first lines of the index as the operator should see them.
    ///
    /// # Errors
    ///
    /// Returns an error if the index cannot be read.
    pub fn preview(&self) -> CoreResult<String> {
        let text = read_text_strip_bom(&self.repo_dir.join(self.index_path()))?;
        Ok(text
            .lines()
            .take(self.preview_lines)
            .collect::<Vec<_>>()
            .join("\n"))
    }

    /// Records `release` in the changelog.
    ///
    /// Creates the notes file, inserts the index section, shows the result
    /// for review and stages both files once the operator approves.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UserAborted`] if the operator rejects the
    /// result; the index is left modified but unstaged. Any file or
    /// version-control failure is returned as is.
    pub fn update(
        &self,
        release: &str,
        operator: &mut dyn Operator,
        vcs: &dyn VersionControl,
    ) -> CoreResult<ChangelogUpdate> {
        let notes = self.create_notes(release)?;

        if !self.splice_index(release)? {
            let title = section_title(release);
            info!(%title, "changelog index not modified, section already present");
            return Ok(ChangelogUpdate::AlreadyPresent { title });
        }

        operator.show(&self.preview()?)?;
        if !operator.confirm(REVIEW_QUESTION, false)? {
            return Err(CoreError::UserAborted(REVIEW_QUESTION.to_string()));
        }

        let index = self.index_path();
        vcs.stage_paths(&[index.clone(), notes.clone()])?;
        Ok(ChangelogUpdate::Added { index, notes })
    }
}

fn section_title(release: &str) -> String {
    format!("Version {}", short(release))
}

/// Reads the change notes of `release`.
///
/// # Errors
///
/// Returns [`CoreError::FileNotFound`] if the release has no notes file.
pub fn release_changes(repo_dir: &Path, docs_dir: &Path, release: &str) -> CoreResult<String> {
    let path = repo_dir
        .join(docs_dir)
        .join(NOTES_DIR_NAME)
        .join(notes_file_name(release));
    read_text_strip_bom(&path)
}
