//! Version command.

use anyhow::{Context, Result};
use clap::Args;
use relcycle_core::{long_release_name, notes_file_name, pretag, short, strip_pretags};

/// Arguments for the version command.
#[derive(Debug, Args)]
pub struct VersionArgs {
    /// Release name, e.g. 0.8 or 0.8.1rc1
    pub release: String,
}

/// Runs the version command.
pub fn run(args: &VersionArgs) -> Result<()> {
    let name = args.release.as_str();
    let long = long_release_name(name).context("invalid release name")?;
    let prerelease = match pretag(name) {
        Some((tag, _)) => format!("yes ({tag})"),
        None => "no".to_string(),
    };

    println!("short:      {}", short(name));
    println!("long:       {long}");
    println!("stripped:   {}", strip_pretags(name));
    println!("prerelease: {prerelease}");
    println!("notes file: {}", notes_file_name(name));
    Ok(())
}
