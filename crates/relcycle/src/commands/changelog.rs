//! Changelog command.

use anyhow::{Context, Result};
use clap::Args;
use relcycle_core::{ChangelogUpdate, long_release_name};

use super::{Options, operator};

/// Arguments for the changelog command.
#[derive(Debug, Args)]
pub struct ChangelogArgs {
    /// Release name, e.g. 0.8 or 0.8.1rc1
    pub release: String,

    /// Documentation directory (overrides [changelog] docs_dir)
    #[arg(short, long)]
    pub docs: Option<String>,

    /// Answer yes to every confirmation
    #[arg(short, long)]
    pub yes: bool,
}

/// Runs the changelog command.
pub fn run(args: ChangelogArgs, options: &Options) -> Result<()> {
    long_release_name(&args.release).context("invalid release name")?;

    let project = options.open_project()?;
    let docs_dir = project.docs_dir(args.docs).context(
        "no documentation directory: pass --docs or set [changelog] docs_dir in relcycle.toml",
    )?;

    let editor = project.changelog_editor(&docs_dir);
    let mut operator = operator(args.yes);

    match editor.update(&args.release, operator.as_mut(), &project.git)? {
        ChangelogUpdate::Added { index, notes } => {
            println!("Staged {} and {}", index.display(), notes.display());
        }
        ChangelogUpdate::AlreadyPresent { title } => {
            println!("{title} is already in the changelog");
        }
    }
    Ok(())
}
