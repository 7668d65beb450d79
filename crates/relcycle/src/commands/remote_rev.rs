//! Remote revision command.

use anyhow::{Context, Result};
use clap::Args;
use relcycle_git::GitCommand;
use tracing::info;

use super::Options;

/// Arguments for the remote-rev command.
#[derive(Debug, Args)]
pub struct RemoteRevArgs {
    /// Remote URL (default: [remote] url)
    pub url: Option<String>,

    /// Branch ref (default: [remote] branch)
    #[arg(short, long)]
    pub branch: Option<String>,
}

/// Runs the remote-rev command.
pub fn run(args: RemoteRevArgs, options: &Options) -> Result<()> {
    let config = options.load_config(&options.repo)?;
    let url = args.url.or(config.remote.url).context(
        "no remote URL: pass one or set [remote] url in relcycle.toml",
    )?;
    let branch = args.branch.unwrap_or(config.remote.branch);

    let rev = GitCommand::new(&options.repo)
        .remote_last_rev(&url, Some(branch.as_str()))
        .with_context(|| format!("failed to query {url}"))?;

    info!(%url, %branch, %rev, "found remote revision");
    println!("{rev}");
    Ok(())
}
