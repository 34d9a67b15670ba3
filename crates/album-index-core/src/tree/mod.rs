mod indexer;
mod index;

pub use indexer::build_tree;
pub use index::TreeIndex;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::Error;

/// One directory of the collection hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "folder", rename_all = "camelCase")]
pub struct FolderNode {
    pub name: String,
    /// Slash-separated path from the indexed root; empty for the root.
    pub path: String,
    pub children: Vec<FolderNode>,
    pub data_file: Option<String>,
}

impl FolderNode {
    /// Depth-first, pre-order iteration over this node and its descendants.
    pub fn walk(&self) -> Nodes<'_> {
        Nodes { stack: vec![self] }
    }

    pub fn find(&self, path: &str) -> Option<&FolderNode> {
        let key = crate::paths::normalize_key(path);
        self.walk().find(|node| node.path == key)
    }

    pub fn node_count(&self) -> usize {
        self.walk().count()
    }
}

pub struct Nodes<'a> {
    stack: Vec<&'a FolderNode>,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = &'a FolderNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// The persisted artifact is an array holding the root node.
pub fn to_json_string(tree: &FolderNode) -> Result<String, Error> {
    Ok(serde_json::to_string_pretty(&[tree])?)
}

pub fn write_tree_json(tree: &FolderNode, output: &Path) -> Result<(), Error> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(output, to_json_string(tree)?)?;
    Ok(())
}

pub fn read_tree_json(input: &Path) -> Result<FolderNode, Error> {
    let content = fs::read_to_string(input)?;
    let mut roots: Vec<FolderNode> =
        serde_json::from_str(&content).map_err(|e| Error::parse(input, e.to_string()))?;
    if roots.is_empty() {
        return Err(Error::parse(input, "tree document has no root folder"));
    }
    Ok(roots.swap_remove(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(name: &str, path: &str, data_file: Option<&str>) -> FolderNode {
        FolderNode {
            name: name.to_string(),
            path: path.to_string(),
            children: Vec::new(),
            data_file: data_file.map(str::to_string),
        }
    }

    fn sample() -> FolderNode {
        FolderNode {
            name: "albums".to_string(),
            path: String::new(),
            children: vec![FolderNode {
                name: "Europe".to_string(),
                path: "Europe".to_string(),
                children: vec![
                    leaf("France", "Europe/France", Some("France.json")),
                    leaf("Italie", "Europe/Italie", None),
                ],
                data_file: None,
            }],
            data_file: None,
        }
    }

    #[test]
    fn test_walk_is_preorder() {
        let tree = sample();
        let paths: Vec<&str> = tree.walk().map(|n| n.path.as_str()).collect();
        assert_eq!(paths, vec!["", "Europe", "Europe/France", "Europe/Italie"]);
        assert_eq!(tree.node_count(), 4);
        assert_eq!(
            tree.find("/Europe/France/").and_then(|n| n.data_file.as_deref()),
            Some("France.json")
        );
    }

    #[test]
    fn test_serialized_shape() {
        let json: serde_json::Value =
            serde_json::from_str(&to_json_string(&sample()).unwrap()).unwrap();
        let root = &json[0];
        assert_eq!(root["type"], "folder");
        assert_eq!(root["path"], "");
        assert!(root["dataFile"].is_null());
        let france = &root["children"][0]["children"][0];
        assert_eq!(france["name"], "France");
        assert_eq!(france["dataFile"], "France.json");
        let keys: Vec<&String> = france.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["type", "name", "path", "children", "dataFile"]);
    }

    #[test]
    fn test_write_then_read_tree() {
        let tmp = tempfile::tempdir().unwrap();
        let output = tmp.path().join("public").join("albums-tree.json");
        write_tree_json(&sample(), &output).unwrap();
        assert_eq!(read_tree_json(&output).unwrap(), sample());

        fs::write(&output, "[]").unwrap();
        assert!(matches!(read_tree_json(&output), Err(Error::Parse { .. })));
    }
}
