//! Project scanning functions (pure, no side effects).

use std::borrow::Cow;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::SyncConfig;
use crate::debug;

use super::ImageExtensions;

/// One top-level directory of the projects root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    /// Directory name, reused verbatim for the output subdirectory.
    pub name: OsString,
    /// Absolute source directory.
    pub source: PathBuf,
    /// File names of images found directly inside `source`, sorted.
    pub images: Vec<OsString>,
}

impl Project {
    /// Name for log output (lossy for non UTF-8 names).
    pub fn display_name(&self) -> Cow<'_, str> {
        self.name.to_string_lossy()
    }
}

/// Scan the projects root.
///
/// Returns one `Project` per immediate subdirectory, each carrying the
/// image files that sit directly inside it:
///
/// ```text
/// src/projects/
/// ├── README.md          -> (not a directory, skipped)
/// ├── alpha/             -> Project "alpha"
/// │   ├── logo.svg       -> image
/// │   ├── notes.txt      -> (not an image, skipped)
/// │   └── sub/icon.png   -> (nested, skipped)
/// └── beta/              -> Project "beta", no images
/// ```
///
/// Listing order is not stable across filesystems, so projects and images
/// are sorted by name.
///
/// # Pure Function
///
/// This function only reads the filesystem and returns data.
/// Fails if the projects root is missing or unreadable.
/// Entries are classified without following symlinks.
pub fn scan_projects(config: &SyncConfig) -> Result<Vec<Project>> {
    let root = &config.projects;
    let entries = fs::read_dir(root)
        .with_context(|| format!("Failed to read projects directory: {}", root.display()))?;

    let mut projects = Vec::new();
    for entry in entries {
        let entry =
            entry.with_context(|| format!("Failed to list projects in {}", root.display()))?;
        let path = entry.path();
        let file_type = entry
            .file_type()
            .with_context(|| format!("Failed to inspect {}", path.display()))?;

        // Symlinks are not followed: a linked directory is not a project
        if !file_type.is_dir() {
            debug!("scan"; "skipping non-directory {}", path.display());
            continue;
        }

        let images = scan_images(&path, &config.extensions)?;
        projects.push(Project {
            name: entry.file_name(),
            source: path,
            images,
        });
    }

    projects.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(projects)
}

/// List image files directly inside `dir` (no recursion).
fn scan_images(dir: &Path, extensions: &ImageExtensions) -> Result<Vec<OsString>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read project directory: {}", dir.display()))?;

    let mut images = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to list files in {}", dir.display()))?;
        let path = entry.path();
        let file_type = entry
            .file_type()
            .with_context(|| format!("Failed to inspect {}", path.display()))?;

        // Anything but a directory is a copy candidate; broken links fail at copy time
        if file_type.is_dir() {
            continue;
        }
        if !extensions.matches(&path) {
            debug!("scan"; "ignoring {}", path.display());
            continue;
        }
        images.push(entry.file_name());
    }

    images.sort();
    Ok(images)
}
