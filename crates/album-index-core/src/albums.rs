//! Gallery listing: albums and their image pages.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::error::Error;
use crate::paths;
use crate::scanner::{self, ScanOptions};
use crate::stats::UNKNOWN_GROUP;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumPage {
    pub name: String,
    pub images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub title: String,
    /// Album folder relative to the albums root.
    pub folder: String,
    pub continent: String,
    pub country: String,
    pub pages: Vec<AlbumPage>,
}

/// Every folder directly holding images is a page of the album formed by
/// its parent folder. Albums are ordered by folder, pages by name.
pub fn scan_albums(root: &Path, options: &ScanOptions) -> Result<Vec<Album>, Error> {
    if !fs::metadata(root)?.is_dir() {
        return Err(Error::InvalidPath(format!(
            "{} is not a directory",
            root.display()
        )));
    }

    let mut albums: BTreeMap<String, Album> = BTreeMap::new();

    let walker = WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_hidden(entry) && !options.is_ignored(entry.path()));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("Error walking albums: {}", err);
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }

        let images = match scanner::list_dir(entry.path(), options) {
            Ok(listing) => listing.images,
            Err(err) => {
                warn!("Skipping unreadable folder: {}", err);
                continue;
            }
        };
        if images.is_empty() {
            continue;
        }

        let page_relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        let album_relative = page_relative.parent().unwrap_or(Path::new(""));
        let folder = paths::to_relative_string(album_relative);

        let album = albums
            .entry(folder.clone())
            .or_insert_with(|| new_album(root, &folder));
        let mut images = images;
        images.sort();
        album.pages.push(AlbumPage {
            name: entry.file_name().to_string_lossy().into_owned(),
            images,
        });
    }

    let mut albums: Vec<Album> = albums.into_values().collect();
    for album in &mut albums {
        album.pages.sort_by(|a, b| a.name.cmp(&b.name));
    }
    debug!("Found {} albums under {}", albums.len(), root.display());
    Ok(albums)
}

pub fn write_albums_json(albums: &[Album], output: &Path) -> Result<(), Error> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(output, serde_json::to_string_pretty(albums)?)?;
    Ok(())
}

fn new_album(root: &Path, folder: &str) -> Album {
    let mut segments = folder.split('/').filter(|s| !s.is_empty());
    let continent = segments.next().unwrap_or(UNKNOWN_GROUP).to_string();
    let country = segments.next().unwrap_or(UNKNOWN_GROUP).to_string();
    let title = folder
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .or_else(|| root.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_default();

    Album {
        id: album_id(folder),
        title,
        folder: folder.to_string(),
        continent,
        country,
        pages: Vec::new(),
    }
}

/// `Europe/France/Album 1` → `europe-france-album-1`.
pub fn album_id(folder: &str) -> String {
    folder
        .chars()
        .map(|ch| {
            if ch == '/' || ch == '\\' || ch.is_whitespace() {
                '-'
            } else {
                ch
            }
        })
        .collect::<String>()
        .to_lowercase()
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(scanner::is_hidden)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_album_id() {
        assert_eq!(album_id("Europe/France/Album 1"), "europe-france-album-1");
        assert_eq!(album_id(""), "");
    }
}
