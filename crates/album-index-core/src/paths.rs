use std::path::{Component, Path, PathBuf};

use crate::error::Error;

/// Slash-separated form of a path relative to an indexed root.
pub fn to_relative_string(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(segment) => Some(segment.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Canonical lookup key for a caller-supplied relative path:
/// backslashes become slashes, empty and `.` segments are dropped.
pub fn normalize_key(path: &str) -> String {
    path.split(['/', '\\'])
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/")
}

/// Turns a caller-supplied subtree path into a relative path that cannot
/// escape the root it is joined onto.
pub fn sanitize_subtree(path: &str) -> Result<PathBuf, Error> {
    let normalized = path.replace('\\', "/");
    let mut sanitized = PathBuf::new();
    for component in Path::new(&normalized).components() {
        match component {
            Component::Normal(segment) => sanitized.push(segment),
            Component::CurDir => {}
            Component::RootDir if sanitized.as_os_str().is_empty() => {}
            _ => {
                return Err(Error::InvalidPath(format!(
                    "'{}' escapes the albums root",
                    path
                )))
            }
        }
    }
    Ok(sanitized)
}

/// First segment of a relative path, if any.
pub fn first_segment(relative: &str) -> Option<&str> {
    relative.split('/').find(|segment| !segment.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_string_uses_forward_slashes() {
        let path: PathBuf = ["Europe", "France", "Album 1"].iter().collect();
        assert_eq!(to_relative_string(&path), "Europe/France/Album 1");
        assert_eq!(to_relative_string(Path::new("")), "");
    }

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("/Europe\\France/"), "Europe/France");
        assert_eq!(normalize_key("./Asie//Japon"), "Asie/Japon");
        assert_eq!(normalize_key(""), "");
    }

    #[test]
    fn test_sanitize_subtree_rejects_parent_components() {
        assert!(sanitize_subtree("../etc").is_err());
        assert!(sanitize_subtree("Europe/../../x").is_err());
        assert_eq!(
            sanitize_subtree("/Europe/France").unwrap(),
            PathBuf::from("Europe").join("France")
        );
        assert_eq!(sanitize_subtree("").unwrap(), PathBuf::new());
    }

    #[test]
    fn test_first_segment() {
        assert_eq!(first_segment("Europe/France"), Some("Europe"));
        assert_eq!(first_segment(""), None);
    }
}
