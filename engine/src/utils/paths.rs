//! Path helpers for asset-relative file paths

use std::path::{Component, Path, PathBuf};

/// Normalize a path into the form stored in the asset registry.
///
/// Backslashes become forward slashes, `.` segments are dropped and `..`
/// pops the previous segment where one exists.
pub fn normalize_path<P: AsRef<Path>>(path: P) -> PathBuf {
    let path_str = path.as_ref().to_string_lossy().replace('\\', "/");
    let mut normalized = PathBuf::new();
    for component in Path::new(&path_str).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push("..");
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Express `path` relative to `base` when it lives underneath it.
///
/// Relative inputs are taken as already relative to `base` and returned
/// normalized. Either kind of input yields `None` once it leaves `base`.
pub fn relative_to<P: AsRef<Path>, B: AsRef<Path>>(path: P, base: B) -> Option<PathBuf> {
    let path = normalize_path(path);
    if path.is_relative() {
        return (!escapes_base(&path)).then_some(path);
    }
    let base = normalize_path(base);
    path.strip_prefix(&base).ok().map(Path::to_path_buf)
}

/// True when a normalized relative path climbs above its starting directory
pub fn escapes_base<P: AsRef<Path>>(path: P) -> bool {
    matches!(
        path.as_ref().components().next(),
        Some(Component::ParentDir | Component::RootDir | Component::Prefix(_))
    )
}

/// Registry key form of a path: normalized with forward slashes
pub fn path_key<P: AsRef<Path>>(path: P) -> String {
    normalize_path(path).to_string_lossy().replace('\\', "/")
}

/// Lowercased file extension, if any
pub fn extension_lowercase<P: AsRef<Path>>(path: P) -> Option<String> {
    path.as_ref()
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_backslashes() {
        let normalized = normalize_path("Textures\\Player\\idle.png");
        assert_eq!(path_key(normalized), "Textures/Player/idle.png");
    }

    #[test]
    fn test_normalize_path_drops_current_dir() {
        assert_eq!(path_key("./Scenes/./Start.cobra"), "Scenes/Start.cobra");
    }

    #[test]
    fn test_normalize_path_resolves_parent_segments() {
        assert_eq!(path_key("Textures/../Scenes/Start.cobra"), "Scenes/Start.cobra");
    }

    #[test]
    fn test_relative_to_strips_base() {
        let rel = relative_to("/project/Assets/Textures/a.png", "/project/Assets").unwrap();
        assert_eq!(path_key(rel), "Textures/a.png");
    }

    #[test]
    fn test_relative_to_outside_base() {
        assert!(relative_to("/elsewhere/a.png", "/project/Assets").is_none());
    }

    #[test]
    fn test_relative_to_rejects_parent_escape() {
        assert!(relative_to("../Outside.png", "/project/Assets").is_none());
        assert!(relative_to("Textures/../../Outside.png", "/project/Assets").is_none());
        let inside = relative_to("Textures/../Scenes/Start.cobra", "/project/Assets").unwrap();
        assert_eq!(path_key(inside), "Scenes/Start.cobra");
    }

    #[test]
    fn test_extension_lowercase() {
        assert_eq!(extension_lowercase("a/B.PNG").as_deref(), Some("png"));
        assert_eq!(extension_lowercase("noext"), None);
    }
}
