//! Notes command.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use relcycle_core::release_changes;

use super::Options;

/// Arguments for the notes command.
#[derive(Debug, Args)]
pub struct NotesArgs {
    /// Release name, e.g. 0.8 or 0.8.1rc1
    pub release: String,

    /// Documentation directory (overrides [changelog] docs_dir)
    #[arg(short, long)]
    pub docs: Option<String>,
}

/// Runs the notes command.
pub fn run(args: NotesArgs, options: &Options) -> Result<()> {
    let project = options.open_project()?;
    let docs_dir = project.docs_dir(args.docs).context(
        "no documentation directory: pass --docs or set [changelog] docs_dir in relcycle.toml",
    )?;

    let notes = release_changes(&project.root, Path::new(&docs_dir), &args.release)
        .with_context(|| format!("no change notes for release {}", args.release))?;
    print!("{notes}");
    Ok(())
}
