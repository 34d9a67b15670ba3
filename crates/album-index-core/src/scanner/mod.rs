mod listing;

pub use listing::{list_dir, DirListing, Subdir};

use glob::Pattern;
use std::path::Path;
use tracing::error;

/// Settings shared by every directory walk: which files count as
/// structured data or images, which entries are ignored, and whether
/// listing order is made deterministic.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    data_extensions: Vec<String>,
    image_extensions: Vec<String>,
    ignore_patterns: Vec<Pattern>,
    sort_entries: bool,
}

impl ScanOptions {
    pub fn new<S: AsRef<str>>(data_extensions: &[S], image_extensions: &[S]) -> Self {
        Self {
            data_extensions: normalize_extensions(data_extensions),
            image_extensions: normalize_extensions(image_extensions),
            ignore_patterns: Vec::new(),
            sort_entries: true,
        }
    }

    pub fn with_sorting(mut self, sort_entries: bool) -> Self {
        self.sort_entries = sort_entries;
        self
    }

    /// Invalid globs are logged and dropped.
    pub fn with_ignore_patterns<S: AsRef<str>>(mut self, globs: &[S]) -> Self {
        self.ignore_patterns = globs
            .iter()
            .filter_map(|glob| match Pattern::new(glob.as_ref()) {
                Ok(p) => Some(p),
                Err(e) => {
                    error!("Invalid glob pattern '{}': {}", glob.as_ref(), e);
                    None
                }
            })
            .collect();
        self
    }

    pub fn sorts_entries(&self) -> bool {
        self.sort_entries
    }

    pub fn is_data_file(&self, name: &str) -> bool {
        has_extension(name, &self.data_extensions)
    }

    pub fn is_image_file(&self, name: &str) -> bool {
        has_extension(name, &self.image_extensions)
    }

    /// Extension used when writing a new data file.
    pub fn primary_data_extension(&self) -> &str {
        self.data_extensions
            .first()
            .map(String::as_str)
            .unwrap_or("json")
    }

    pub fn is_ignored(&self, path: &Path) -> bool {
        self.ignore_patterns
            .iter()
            .any(|pattern| pattern.matches_path(path))
    }
}

pub fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

fn normalize_extensions<S: AsRef<str>>(extensions: &[S]) -> Vec<String> {
    extensions
        .iter()
        .map(|ext| ext.as_ref().trim_start_matches('.').to_lowercase())
        .filter(|ext| !ext.is_empty())
        .collect()
}

fn has_extension(name: &str, extensions: &[String]) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_lowercase();
            extensions.iter().any(|candidate| *candidate == ext)
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> ScanOptions {
        ScanOptions::new(&["json"], &[".JPG", "jpeg", "png"])
    }

    #[test]
    fn test_extension_matching_is_case_insensitive() {
        let options = options();
        assert!(options.is_data_file("France.JSON"));
        assert!(!options.is_data_file("France.json.bak"));
        assert!(!options.is_data_file("json"));
        assert!(options.is_image_file("page-01.jpg"));
        assert!(options.is_image_file("scan.PNG"));
        assert!(!options.is_image_file("notes.txt"));
    }

    #[test]
    fn test_invalid_glob_is_dropped() {
        let options = options().with_ignore_patterns(&["[", "**/drafts"]);
        assert!(options.is_ignored(Path::new("Europe/drafts")));
        assert!(!options.is_ignored(Path::new("Europe/France")));
    }

    #[test]
    fn test_primary_data_extension_defaults_to_json() {
        assert_eq!(options().primary_data_extension(), "json");
        let empty: [&str; 0] = [];
        assert_eq!(ScanOptions::new(&empty, &empty).primary_data_extension(), "json");
    }
}
