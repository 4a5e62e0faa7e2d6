//! Asset synchronization with side effects (clear, create, copy).

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::SyncConfig;
use crate::log;
use crate::logger::plural;

use super::scan::{Project, scan_projects};

/// Counters for a finished sync run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub projects: usize,
    pub images: usize,
}

/// Rebuild the output root from scratch.
///
/// Pipeline: clear output -> scan projects -> per project (mkdir + copy).
///
/// ```text
/// src/projects/alpha/logo.svg   -> public/project-assets/alpha/logo.svg
/// src/projects/beta/            -> public/project-assets/beta/ (empty)
/// ```
///
/// Any I/O failure aborts the run. Files written before the failure stay
/// on disk.
pub fn sync_projects(config: &SyncConfig) -> Result<SyncReport> {
    reset_output(&config.output)?;

    let projects = scan_projects(config)?;
    let mut report = SyncReport::default();

    for project in &projects {
        report.images += copy_project(project, &config.output)?;
        report.projects += 1;
    }

    log!(
        "sync";
        "synced {} from {}",
        plural(report.images, "image"),
        plural(report.projects, "project")
    );
    Ok(report)
}

/// Remove the output root (whatever it is) and recreate it as an empty directory.
fn reset_output(output: &Path) -> Result<()> {
    match fs::symlink_metadata(output) {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(output).with_context(|| {
            format!("Failed to clear output directory: {}", output.display())
        })?,
        Ok(_) => fs::remove_file(output)
            .with_context(|| format!("Failed to remove output path: {}", output.display()))?,
        Err(err) if err.kind() == ErrorKind::NotFound => {}
        Err(err) => {
            return Err(err)
                .with_context(|| format!("Failed to inspect output path: {}", output.display()));
        }
    }

    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))
}

/// Create the project's output directory and copy its images into it.
///
/// Returns the number of files copied.
fn copy_project(project: &Project, output_root: &Path) -> Result<usize> {
    let dest_dir = output_root.join(&project.name);
    fs::create_dir_all(&dest_dir)
        .with_context(|| format!("Failed to create directory: {}", dest_dir.display()))?;

    for image in &project.images {
        let src = project.source.join(image);
        let dest = dest_dir.join(image);
        fs::copy(&src, &dest).with_context(|| {
            format!("Failed to copy {} to {}", src.display(), dest.display())
        })?;
        log!("copied"; "{}/{}", project.display_name(), image.to_string_lossy());
    }

    Ok(project.images.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::ImageExtensions;
    use std::path::PathBuf;
    use tempfile::TempDir;

    struct Fixture {
        _dir: TempDir,
        config: SyncConfig,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let config = SyncConfig {
                projects: dir.path().join("src/projects"),
                output: dir.path().join("public/project-assets"),
                extensions: ImageExtensions::default(),
            };
            fs::create_dir_all(&config.projects).unwrap();
            Self { _dir: dir, config }
        }

        fn write(&self, rel: &str, contents: &[u8]) {
            let path = self.config.projects.join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, contents).unwrap();
        }

        fn mkdir(&self, rel: &str) {
            fs::create_dir_all(self.config.projects.join(rel)).unwrap();
        }

        fn output(&self, rel: &str) -> PathBuf {
            self.config.output.join(rel)
        }

        /// Every path under the output root, relative and sorted.
        fn output_tree(&self) -> Vec<String> {
            let mut paths = Vec::new();
            collect_tree(&self.config.output, &self.config.output, &mut paths);
            paths.sort();
            paths
        }
    }

    fn collect_tree(dir: &Path, base: &Path, paths: &mut Vec<String>) {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            let rel = path.strip_prefix(base).unwrap().to_string_lossy().replace('\\', "/");
            if path.is_dir() {
                paths.push(format!("{rel}/"));
                collect_tree(&path, base, paths);
            } else {
                paths.push(rel);
            }
        }
    }

    #[test]
    fn test_sync_scenario() {
        let fx = Fixture::new();
        fx.write("alpha/logo.svg", b"<svg/>");
        fx.write("alpha/notes.txt", b"notes");
        fx.write("alpha/sub/icon.png", b"png");
        fx.mkdir("beta");

        let report = sync_projects(&fx.config).unwrap();

        assert_eq!(report, SyncReport { projects: 2, images: 1 });
        assert_eq!(fx.output_tree(), ["alpha/", "alpha/logo.svg", "beta/"]);
        assert_eq!(fs::read(fx.output("alpha/logo.svg")).unwrap(), b"<svg/>");
    }

    #[test]
    fn test_sync_copies_bytes_verbatim() {
        let fx = Fixture::new();
        let bytes: Vec<u8> = (0..=255).cycle().take(4096).collect();
        fx.write("alpha/photo.JPG", &bytes);
        fx.write("alpha/anim.gif", b"GIF89a");
        fx.write("gamma/hero.webp", b"RIFF");

        sync_projects(&fx.config).unwrap();

        assert_eq!(fs::read(fx.output("alpha/photo.JPG")).unwrap(), bytes);
        assert_eq!(fs::read(fx.output("alpha/anim.gif")).unwrap(), b"GIF89a");
        assert_eq!(fs::read(fx.output("gamma/hero.webp")).unwrap(), b"RIFF");
    }

    #[test]
    fn test_sync_is_idempotent() {
        let fx = Fixture::new();
        fx.write("alpha/logo.svg", b"<svg/>");
        fx.write("alpha/cover.png", b"png");
        fx.mkdir("beta");

        sync_projects(&fx.config).unwrap();
        let first = fx.output_tree();
        let first_logo = fs::read(fx.output("alpha/logo.svg")).unwrap();

        sync_projects(&fx.config).unwrap();
        assert_eq!(fx.output_tree(), first);
        assert_eq!(fs::read(fx.output("alpha/logo.svg")).unwrap(), first_logo);
    }

    #[test]
    fn test_sync_removes_stale_output() {
        let fx = Fixture::new();
        fx.write("alpha/logo.svg", b"<svg/>");
        fs::create_dir_all(fx.output("removed")).unwrap();
        fs::write(fx.output("removed/old.png"), b"old").unwrap();
        fs::create_dir_all(fx.output("alpha")).unwrap();
        fs::write(fx.output("alpha/deleted.png"), b"old").unwrap();

        sync_projects(&fx.config).unwrap();

        assert_eq!(fx.output_tree(), ["alpha/", "alpha/logo.svg"]);
    }

    #[test]
    fn test_sync_replaces_file_at_output_path() {
        let fx = Fixture::new();
        fx.write("alpha/logo.svg", b"<svg/>");
        fs::create_dir_all(fx.config.output.parent().unwrap()).unwrap();
        fs::write(&fx.config.output, b"not a directory").unwrap();

        sync_projects(&fx.config).unwrap();

        assert!(fx.config.output.is_dir());
        assert!(fx.output("alpha/logo.svg").is_file());
    }

    #[test]
    fn test_sync_empty_projects_root() {
        let fx = Fixture::new();

        let report = sync_projects(&fx.config).unwrap();

        assert_eq!(report, SyncReport::default());
        assert!(fx.config.output.is_dir());
        assert!(fx.output_tree().is_empty());
    }

    #[test]
    fn test_sync_missing_projects_root_fails() {
        let fx = Fixture::new();
        fs::remove_dir_all(&fx.config.projects).unwrap();

        let err = sync_projects(&fx.config).unwrap_err();

        let io = err.downcast_ref::<std::io::Error>().unwrap();
        assert_eq!(io.kind(), ErrorKind::NotFound);
        // Output root is still reset before the scan fails
        assert!(fx.config.output.is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn test_sync_aborts_on_broken_image() {
        let fx = Fixture::new();
        fx.write("alpha/logo.svg", b"<svg/>");
        std::os::unix::fs::symlink(
            fx.config.projects.join("missing.png"),
            fx.config.projects.join("alpha/broken.png"),
        )
        .unwrap();

        let err = sync_projects(&fx.config).unwrap_err();

        let io = err.downcast_ref::<std::io::Error>().unwrap();
        assert_eq!(io.kind(), ErrorKind::NotFound);
        assert!(format!("{err:#}").contains("broken.png"));
    }

    #[cfg(unix)]
    #[test]
    fn test_sync_skips_symlinked_project() {
        let fx = Fixture::new();
        fx.write("alpha/logo.svg", b"<svg/>");
        let elsewhere = fx.config.projects.parent().unwrap().join("elsewhere");
        fs::create_dir_all(&elsewhere).unwrap();
        fs::write(elsewhere.join("logo.png"), b"png").unwrap();
        std::os::unix::fs::symlink(&elsewhere, fx.config.projects.join("linked")).unwrap();

        let report = sync_projects(&fx.config).unwrap();

        assert_eq!(report, SyncReport { projects: 1, images: 1 });
        assert!(!fx.output("linked").exists());
        assert_eq!(fx.output_tree(), ["alpha/", "alpha/logo.svg"]);
    }
}
