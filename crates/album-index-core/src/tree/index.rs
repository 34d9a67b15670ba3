use ahash::AHashMap;
use std::path::{Path, PathBuf};

use super::FolderNode;
use crate::paths;

/// Path lookup over a built tree, so a selected folder can be resolved to
/// its data file without touching the filesystem again.
pub struct TreeIndex<'t> {
    nodes: AHashMap<&'t str, &'t FolderNode>,
}

impl<'t> TreeIndex<'t> {
    pub fn new(tree: &'t FolderNode) -> Self {
        let nodes = tree.walk().map(|node| (node.path.as_str(), node)).collect();
        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.folder(path).is_some()
    }

    pub fn folder(&self, path: &str) -> Option<&'t FolderNode> {
        let key = paths::normalize_key(path);
        self.nodes.get(key.as_str()).copied()
    }

    /// `None` both for unknown folders and folders without a data file.
    pub fn data_file_for(&self, path: &str) -> Option<&'t str> {
        self.folder(path).and_then(|node| node.data_file.as_deref())
    }

    /// Location of a folder's data file on disk, given the indexed root.
    pub fn data_file_path(&self, root: &Path, path: &str) -> Option<PathBuf> {
        let node = self.folder(path)?;
        let file = node.data_file.as_deref()?;
        let mut location = root.to_path_buf();
        location.extend(node.path.split('/').filter(|s| !s.is_empty()));
        Some(location.join(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_paths() {
        let tree = FolderNode {
            name: "albums".to_string(),
            path: String::new(),
            children: vec![FolderNode {
                name: "Asie".to_string(),
                path: "Asie".to_string(),
                children: Vec::new(),
                data_file: Some("Asie.json".to_string()),
            }],
            data_file: None,
        };

        let index = TreeIndex::new(&tree);
        assert_eq!(index.len(), 2);
        assert!(index.contains(""));
        assert_eq!(index.data_file_for("Asie/"), Some("Asie.json"));
        assert_eq!(index.data_file_for(""), None);
        assert_eq!(index.data_file_for("Afrique"), None);
        assert_eq!(
            index.data_file_path(Path::new("/srv/albums"), "\\Asie"),
            Some(Path::new("/srv/albums").join("Asie").join("Asie.json"))
        );
    }
}
