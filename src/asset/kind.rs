//! Image file classification.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Extensions recognized as images when no config overrides them.
pub const DEFAULT_EXTENSIONS: &[&str] = &["svg", "png", "jpg", "jpeg", "gif", "webp"];

/// Set of recognized image extensions.
///
/// Entries are stored lowercase without a leading dot, so `".PNG"` in a
/// config file is the same as `"png"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct ImageExtensions(Vec<String>);

impl ImageExtensions {
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list: Vec<String> = Vec::new();
        for ext in extensions {
            let ext = ext.as_ref().trim().trim_start_matches('.').to_lowercase();
            if !ext.is_empty() && !list.contains(&ext) {
                list.push(ext);
            }
        }
        Self(list)
    }

    /// Whether `path` names an image file, judged by its extension only.
    ///
    /// Names without an extension (including dotfiles like `.png`) never match.
    pub fn matches(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        let ext = ext.to_lowercase();
        self.0.iter().any(|known| *known == ext)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Default for ImageExtensions {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSIONS)
    }
}

impl From<Vec<String>> for ImageExtensions {
    fn from(list: Vec<String>) -> Self {
        Self::new(list)
    }
}

impl From<ImageExtensions> for Vec<String> {
    fn from(extensions: ImageExtensions) -> Self {
        extensions.0
    }
}
