//! Core library for relcycle.
//!
//! This crate holds the release-cycle logic: release-name formatting,
//! changelog splicing, version-declaration patching, and the orchestration
//! that ties them to version control and operator review.

mod changelog;
mod error;
mod files;
mod operator;
mod patch;
mod release;
mod template;
mod updater;
mod vcs;
mod version;

pub use changelog::{
    ChangelogDocument, ChangelogEditor, ChangelogUpdate, HEADER_LINES, INDEX_FILE_NAME,
    NOTES_DIR_NAME, NOTES_TEMPLATE_NAME, release_changes,
};
pub use error::{CoreError, CoreResult};
pub use files::{read_text, read_text_strip_bom};
pub use operator::{AssumeYes, Operator, TerminalOperator};
pub use patch::{COMMENT_MARKER, replace_lines, replace_lines_in};
pub use release::{ReleaseOrchestrator, ReleaseOutcome};
pub use template::render;
pub use updater::{ProjectNames, VersionUpdater};
pub use vcs::VersionControl;
pub use version::{
    PreReleaseTag, is_prerelease, long_release_name, notes_file_name, pretag, pretag_pos, short,
    strip_pretags,
};
