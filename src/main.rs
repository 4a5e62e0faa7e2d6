//! project-assets - copy per-project images into the public assets directory.

mod asset;
mod cli;
mod config;
mod logger;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::Cli;
use config::SyncConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = SyncConfig::load(&cli)?;
    debug!("config"; "projects: {}", config.projects.display());
    debug!("config"; "output: {}", config.output.display());
    debug!("config"; "extensions: {}", config.extensions.iter().collect::<Vec<_>>().join(", "));

    asset::sync_projects(&config)?;
    Ok(())
}
