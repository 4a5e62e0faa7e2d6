//! Project asset handling.
//!
//! - `kind`: which files count as images
//! - `scan`: read-only discovery of projects and their images
//! - `process`: output reset and copying

mod kind;
mod process;
mod scan;

pub use kind::ImageExtensions;
pub use process::sync_projects;
