//! Installing converted data files into album folders.

use chrono::{DateTime, Utc};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::Error;
use crate::paths;
use crate::records::{self, RecordPage};
use crate::scanner::{self, ScanOptions};

/// Replaces the data file of an album folder with `pages`.
///
/// The document is written to a hidden temporary file in the album folder
/// and renamed into place; the previous data files are removed only after
/// that succeeds, so the folder ends up with exactly one. A spreadsheet name
/// (`France.xlsx`) is stored under the data extension (`France.json`).
pub fn install_data_file(
    root: &Path,
    album_path: &str,
    file_name: &str,
    pages: &[RecordPage],
    options: &ScanOptions,
) -> Result<PathBuf, Error> {
    let album_dir = resolve_album_dir(root, album_path)?;
    let target_name = data_file_name(file_name, options.primary_data_extension())?;
    let target = album_dir.join(&target_name);

    let rendered = serde_json::to_string_pretty(&records::pages_to_json(pages))?;
    let mut staged = tempfile::Builder::new()
        .prefix(".album-index-")
        .tempfile_in(&album_dir)?;
    staged.write_all(rendered.as_bytes())?;
    staged.as_file().sync_all()?;
    staged.persist(&target).map_err(|err| {
        io::Error::new(
            err.error.kind(),
            format!("Error installing {}: {}", target.display(), err.error),
        )
    })?;

    let listing = scanner::list_dir(&album_dir, options)?;
    for existing in listing.data_files.iter().filter(|name| **name != target_name) {
        debug!("Removing previous data file {}", existing);
        fs::remove_file(album_dir.join(existing))?;
    }

    info!("Installed {} ({} pages)", target.display(), pages.len());
    Ok(target)
}

/// Last modification time of a file inside an album folder.
pub fn data_file_modified(
    root: &Path,
    album_path: &str,
    file_name: &str,
) -> Result<DateTime<Utc>, Error> {
    let album_dir = resolve_album_dir(root, album_path)?;
    let file = plain_file_name(file_name)?;
    let modified = fs::metadata(album_dir.join(file))?.modified()?;
    Ok(DateTime::<Utc>::from(modified))
}

fn resolve_album_dir(root: &Path, album_path: &str) -> Result<PathBuf, Error> {
    let album_dir = root.join(paths::sanitize_subtree(album_path)?);
    if !album_dir.is_dir() {
        return Err(Error::NotFound(format!("album folder '{}'", album_path)));
    }
    Ok(album_dir)
}

fn plain_file_name(file_name: &str) -> Result<&str, Error> {
    let trimmed = file_name.trim();
    if trimmed.is_empty()
        || trimmed.contains(['/', '\\'])
        || trimmed == "."
        || trimmed == ".."
        || scanner::is_hidden(trimmed)
    {
        return Err(Error::InvalidPath(format!(
            "'{}' is not a plain file name",
            file_name
        )));
    }
    Ok(trimmed)
}

fn data_file_name(file_name: &str, extension: &str) -> Result<String, Error> {
    let name = plain_file_name(file_name)?;
    let stem = Path::new(name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| name.to_string());
    Ok(format!("{}.{}", stem, extension))
}
