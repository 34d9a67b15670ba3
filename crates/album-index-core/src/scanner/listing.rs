use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{trace, warn};

use super::{is_hidden, ScanOptions};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subdir {
    pub name: String,
    pub path: PathBuf,
}

/// Visible entries directly inside one directory, classified.
#[derive(Debug, Default)]
pub struct DirListing {
    pub subdirs: Vec<Subdir>,
    pub data_files: Vec<String>,
    pub images: Vec<String>,
}

/// Lists one directory level. Hidden entries, ignored paths, symlinks and
/// names that are not valid UTF-8 are skipped; entries keep listing order unless sorting is enabled.
pub fn list_dir(dir: &Path, options: &ScanOptions) -> io::Result<DirListing> {
    let read_dir = fs::read_dir(dir).map_err(|err| {
        io::Error::new(
            err.kind(),
            format!("Error reading directory {}: {}", dir.display(), err),
        )
    })?;

    let mut entries: Vec<fs::DirEntry> = Vec::new();
    for entry_result in read_dir {
        match entry_result {
            Ok(entry) => entries.push(entry),
            Err(err) => warn!("Error reading entry in directory {}: {}", dir.display(), err),
        }
    }
    if options.sorts_entries() {
        entries.sort_by_key(|entry| entry.file_name());
    }

    let mut listing = DirListing::default();
    for entry in entries {
        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(raw) => {
                warn!("Skipping non UTF-8 entry {:?} in {}", raw, dir.display());
                continue;
            }
        };
        if is_hidden(&name) {
            continue;
        }
        let path = entry.path();
        if options.is_ignored(&path) {
            trace!("Ignoring {}", path.display());
            continue;
        }

        let file_type = match entry.file_type() {
            Ok(file_type) => file_type,
            Err(err) => {
                warn!("Error getting file type for {}: {}", path.display(), err);
                continue;
            }
        };

        if file_type.is_dir() {
            listing.subdirs.push(Subdir { name, path });
        } else if file_type.is_file() {
            if options.is_data_file(&name) {
                listing.data_files.push(name);
            } else if options.is_image_file(&name) {
                listing.images.push(name);
            }
        }
    }

    Ok(listing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_list_dir_classifies_and_sorts() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();
        fs::create_dir(root.join("b-album")).unwrap();
        fs::create_dir(root.join("a-album")).unwrap();
        fs::create_dir(root.join(".cache")).unwrap();
        fs::write(root.join("z.json"), "{}").unwrap();
        fs::write(root.join("a.json"), "{}").unwrap();
        fs::write(root.join(".hidden.json"), "{}").unwrap();
        fs::write(root.join("page.png"), [0u8; 4]).unwrap();
        fs::write(root.join("notes.txt"), "x").unwrap();

        let options = ScanOptions::new(&["json"], &["png"]);
        let listing = list_dir(root, &options).unwrap();

        let names: Vec<&str> = listing.subdirs.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["a-album", "b-album"]);
        assert_eq!(listing.data_files, vec!["a.json", "z.json"]);
        assert_eq!(listing.images, vec!["page.png"]);
    }

    #[test]
    fn test_list_dir_unsorted_keeps_listing_order() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();
        for name in ["Oceanie", "Asie", "Europe", "Afrique"] {
            fs::create_dir(root.join(name)).unwrap();
        }
        let raw_order: Vec<String> = fs::read_dir(root)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect();

        let options = ScanOptions::new(&["json"], &["png"]).with_sorting(false);
        let listing = list_dir(root, &options).unwrap();

        let names: Vec<String> = listing.subdirs.into_iter().map(|s| s.name).collect();
        assert_eq!(names, raw_order);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_list_dir_skips_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let tmp = tempdir().unwrap();
        let root = tmp.path();
        fs::create_dir(root.join(OsStr::from_bytes(b"Europe\xff"))).unwrap();
        fs::create_dir(root.join(OsStr::from_bytes(b"Europe\xfe"))).unwrap();
        fs::write(root.join(OsStr::from_bytes(b"bad\xff.json")), "{}").unwrap();
        fs::create_dir(root.join("Asie")).unwrap();

        let listing = list_dir(root, &ScanOptions::new(&["json"], &["png"])).unwrap();

        let names: Vec<&str> = listing.subdirs.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Asie"]);
        assert!(listing.data_files.is_empty());
    }

    #[test]
    fn test_list_dir_missing_directory_is_error() {
        let tmp = tempdir().unwrap();
        let err = list_dir(&tmp.path().join("missing"), &ScanOptions::default()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
