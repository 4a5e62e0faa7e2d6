//! Sync configuration management for `project-assets.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── error      # ConfigError
//! ├── util       # config discovery, path normalization
//! └── mod.rs     # SyncConfig (this file)
//! ```
//!
//! # Example
//!
//! ```toml
//! [sync]
//! projects = "src/projects"           # one subdirectory per project
//! output = "public/project-assets"    # cleared on every run
//! extensions = ["svg", "png", "jpg", "jpeg", "gif", "webp"]
//! ```
//!
//! The file is optional. Without it the defaults above apply, resolved
//! against the working directory.

mod error;
mod util;

pub use error::ConfigError;
use util::{find_config_file, normalize_path};

use crate::{asset::ImageExtensions, cli::Cli, debug, log};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Layout of `project-assets.toml`.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
struct ConfigFile {
    sync: SyncConfig,
}

/// Everything the synchronizer needs for one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Directory whose immediate subdirectories are projects.
    pub projects: PathBuf,

    /// Directory rebuilt on every run, one subdirectory per project.
    pub output: PathBuf,

    /// Recognized image extensions (case-insensitive).
    pub extensions: ImageExtensions,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            projects: "src/projects".into(),
            output: "public/project-assets".into(),
            extensions: ImageExtensions::default(),
        }
    }
}

impl SyncConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd for the config file. File paths resolve
    /// against the file's directory; CLI paths resolve against cwd and win.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let (mut config, root) = match find_config_file(&cwd, &cli.config) {
            Some(path) => {
                debug!("config"; "using {}", path.display());
                let root = path.parent().map(Path::to_path_buf).unwrap_or_else(|| cwd.clone());
                (Self::from_path(&path)?, root)
            }
            None => {
                debug!("config"; "no {} found, using defaults", cli.config.display());
                (Self::default(), cwd.clone())
            }
        };

        config.normalize(&root);
        config.apply_cli(cli, &cwd);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            let display_path = path
                .file_name()
                .map(|n| n.to_string_lossy())
                .unwrap_or_else(|| path.to_string_lossy());
            log!("warning"; "unknown fields in {}, ignoring: {}", display_path, ignored.join(", "));
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let file: ConfigFile = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((file.sync, ignored))
    }

    /// Make relative paths absolute against `root`.
    pub fn normalize(&mut self, root: &Path) {
        self.projects = root.join(&self.projects);
        self.output = root.join(&self.output);
    }

    /// Apply CLI path overrides (relative to cwd).
    fn apply_cli(&mut self, cli: &Cli, cwd: &Path) {
        if let Some(projects) = &cli.projects {
            self.projects = cwd.join(projects);
        }
        if let Some(output) = &cli.output {
            self.output = cwd.join(output);
        }
    }

    /// Reject settings that make a run meaningless or destructive.
    ///
    /// The output root is deleted at the start of every run, so it must not
    /// be (or contain) the projects root.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.projects.as_os_str().is_empty() {
            return Err(ConfigError::Validation("`sync.projects` is empty".into()));
        }
        if self.output.as_os_str().is_empty() {
            return Err(ConfigError::Validation("`sync.output` is empty".into()));
        }
        if self.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "`sync.extensions` must list at least one extension".into(),
            ));
        }

        let projects = normalize_path(&self.projects);
        let output = normalize_path(&self.output);
        if projects.starts_with(&output) {
            return Err(ConfigError::Validation(format!(
                "output `{}` would delete projects `{}`",
                self.output.display(),
                self.projects.display()
            )));
        }

        Ok(())
    }
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
pub fn test_parse_config(content: &str) -> SyncConfig {
    let (parsed, ignored) = SyncConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}
