//! Command-line interface definitions.

use clap::{ColorChoice, Parser};
use std::path::PathBuf;

/// Mirror per-project image assets into the public directory.
///
/// Runs a full rebuild: the output directory is cleared, then every image
/// found directly inside each project directory is copied into it.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, default_value = "auto")]
    pub color: ColorChoice,

    /// Projects directory (default: src/projects)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub projects: Option<PathBuf>,

    /// Output directory, cleared on every run (default: public/project-assets)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Config file path (searched upward from the current directory)
    #[arg(short = 'C', long, default_value = "project-assets.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short, long)]
    pub verbose: bool,
}
