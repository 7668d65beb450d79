//! Next-release command.

use anyhow::{Context, Result};
use clap::Args;
use relcycle_core::{ChangelogUpdate, ReleaseOrchestrator, long_release_name};
use tracing::info;

use super::{Options, operator};

/// Arguments for the next command.
#[derive(Debug, Args)]
pub struct NextArgs {
    /// Release name, e.g. 0.8 or 0.8.1rc1
    pub release: String,

    /// Package name (overrides [project] package)
    #[arg(short, long)]
    pub package: Option<String>,

    /// Module name (overrides [project] module)
    #[arg(short, long)]
    pub module: Option<String>,

    /// Documentation directory (overrides [changelog] docs_dir)
    #[arg(short, long)]
    pub docs: Option<String>,

    /// Answer yes to every confirmation
    #[arg(short, long)]
    pub yes: bool,
}

/// Runs the next command.
pub fn run(args: NextArgs, options: &Options) -> Result<()> {
    long_release_name(&args.release).context("invalid release name")?;

    let mut project = options.open_project()?;
    project.config.changelog.docs_dir = project.docs_dir(args.docs);
    let names = project.names(args.package, args.module)?;

    info!(
        branch = project.branch.as_deref().unwrap_or("(detached)"),
        release = %args.release,
        "preparing release cycle"
    );

    let orchestrator = ReleaseOrchestrator::from_config(&project.root, names, &project.config);
    let mut operator = operator(args.yes);
    let outcome = orchestrator.add_release(&args.release, operator.as_mut(), &project.git)?;

    match outcome.changelog {
        Some(ChangelogUpdate::Added { index, notes }) => {
            println!("Added release {} to {}", args.release, index.display());
            println!("Write the release notes in {}", notes.display());
        }
        Some(ChangelogUpdate::AlreadyPresent { title }) => {
            println!("{title} is already in the changelog");
        }
        None => {}
    }
    println!("Version set to {}", outcome.dev_version);
    println!("Changes are staged but not committed");
    Ok(())
}
