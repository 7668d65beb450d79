//! CLI definition.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands::{self, Options};

/// Prepare the next release cycle of a project.
#[derive(Debug, Parser)]
#[command(name = "relcycle")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Run as if started in this directory
    #[arg(short = 'C', long = "repo", global = true, default_value = ".")]
    pub repo: PathBuf,

    /// Configuration file (default: relcycle.toml in the repository or a parent)
    #[arg(long, global = true, env = "RELCYCLE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write a default relcycle.toml
    Init(commands::init::InitArgs),

    /// Add a release to the changelog and move to its development version
    Next(commands::next::NextArgs),

    /// Add a release section to the changelog only
    Changelog(commands::changelog::ChangelogArgs),

    /// Show the forms of a release name
    Version(commands::version::VersionArgs),

    /// Print the change notes of a release
    Notes(commands::notes::NotesArgs),

    /// Print the last revision of a remote branch
    RemoteRev(commands::remote_rev::RemoteRevArgs),
}

impl Cli {
    /// Runs the CLI command.
    pub fn run(self) -> Result<()> {
        let options = Options {
            repo: self.repo,
            config: self.config,
        };

        match self.command {
            Commands::Init(args) => commands::init::run(args, &options),
            Commands::Next(args) => commands::next::run(args, &options),
            Commands::Changelog(args) => commands::changelog::run(args, &options),
            Commands::Version(args) => commands::version::run(&args),
            Commands::Notes(args) => commands::notes::run(args, &options),
            Commands::RemoteRev(args) => commands::remote_rev::run(args, &options),
        }
    }
}
