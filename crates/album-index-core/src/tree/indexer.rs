use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, warn};

use super::FolderNode;
use crate::error::Error;
use crate::paths;
use crate::scanner::{self, ScanOptions};

/// Walks `root` and returns its folder tree. Each node records the first
/// structured-data file found directly inside it.
pub fn build_tree(root: &Path, options: &ScanOptions) -> Result<FolderNode, Error> {
    let metadata = fs::metadata(root).map_err(|err| {
        io::Error::new(
            err.kind(),
            format!("Error reading albums root {}: {}", root.display(), err),
        )
    })?;
    if !metadata.is_dir() {
        return Err(Error::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Albums root {} is not a directory", root.display()),
        )));
    }

    let listing = scanner::list_dir(root, options)?;
    let name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string());

    let tree = assemble(name, Path::new(""), listing, options);
    debug!("Indexed {} folders under {}", tree.node_count(), root.display());
    Ok(tree)
}

fn visit(dir: &Path, name: String, relative: &Path, options: &ScanOptions) -> FolderNode {
    match scanner::list_dir(dir, options) {
        Ok(listing) => assemble(name, relative, listing, options),
        Err(err) => {
            warn!("Skipping unreadable folder: {}", err);
            FolderNode {
                name,
                path: paths::to_relative_string(relative),
                children: Vec::new(),
                data_file: None,
            }
        }
    }
}

fn assemble(
    name: String,
    relative: &Path,
    listing: scanner::DirListing,
    options: &ScanOptions,
) -> FolderNode {
    let path = paths::to_relative_string(relative);

    if listing.data_files.len() > 1 {
        warn!(
            "Folder '{}' holds {} data files {:?}; indexing '{}'",
            path,
            listing.data_files.len(),
            listing.data_files,
            listing.data_files[0]
        );
    }

    let children = listing
        .subdirs
        .into_iter()
        .map(|subdir| {
            let child_relative = relative.join(&subdir.name);
            visit(&subdir.path, subdir.name, &child_relative, options)
        })
        .collect();

    FolderNode {
        name,
        path,
        children,
        data_file: listing.data_files.into_iter().next(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_root_must_be_directory() {
        let tmp = tempdir().unwrap();
        let file = tmp.path().join("albums.json");
        fs::write(&file, "{}").unwrap();

        let options = ScanOptions::new(&["json"], &["png"]);
        assert!(matches!(build_tree(&file, &options), Err(Error::Io(_))));
        assert!(matches!(
            build_tree(&tmp.path().join("missing"), &options),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn test_first_data_file_wins() {
        let tmp = tempdir().unwrap();
        let album = tmp.path().join("Europe").join("France");
        fs::create_dir_all(&album).unwrap();
        fs::write(album.join("b.json"), "{}").unwrap();
        fs::write(album.join("a.json"), "{}").unwrap();

        let options = ScanOptions::new(&["json"], &["png"]);
        let tree = build_tree(tmp.path(), &options).unwrap();
        let france = tree.find("Europe/France").unwrap();
        assert_eq!(france.data_file.as_deref(), Some("a.json"));
    }
}
