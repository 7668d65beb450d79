//! Initialize command.

use anyhow::{Context, Result, bail};
use clap::Args;
use relcycle_config::{CONFIG_FILE_NAME, Config, save_config};
use tracing::info;

use super::Options;

/// Arguments for the init command.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Package name to record in [project]
    #[arg(short, long)]
    pub package: Option<String>,

    /// Documentation directory to record in [changelog]
    #[arg(short, long)]
    pub docs: Option<String>,
}

/// Runs the init command.
pub fn run(args: InitArgs, options: &Options) -> Result<()> {
    let path = options
        .config
        .clone()
        .unwrap_or_else(|| options.repo.join(CONFIG_FILE_NAME));

    if path.exists() && !args.force {
        bail!(
            "{} already exists, use --force to overwrite it",
            path.display()
        );
    }

    let mut config = Config::default();
    config.project.package = args.package;
    config.changelog.docs_dir = args.docs;

    save_config(&path, &config)
        .with_context(|| format!("failed to write {}", path.display()))?;

    info!(path = %path.display(), "configuration written");
    println!("Created {}", path.display());
    Ok(())
}
