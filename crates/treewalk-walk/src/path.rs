//! Child path construction.

use std::ffi::{OsStr, OsString};
use std::path::{MAIN_SEPARATOR_STR, Path, PathBuf};

use treewalk_core::WalkError;

/// Join `parent` and a bare entry `name` with a single separator.
///
/// A parent equal to the root separator contributes no prefix, so `/` and
/// `a` give `/a` rather than `//a`. The buffer is reserved up front and a
/// failed reservation is reported as [`WalkError::AllocationFailure`].
pub fn child_path(parent: &Path, name: &OsStr) -> Result<PathBuf, WalkError> {
    let parent_str = parent.as_os_str();
    let prefix = if is_root(parent) {
        OsStr::new("")
    } else {
        parent_str
    };

    let mut joined = OsString::new();
    joined
        .try_reserve_exact(prefix.len() + MAIN_SEPARATOR_STR.len() + name.len())
        .map_err(|source| WalkError::AllocationFailure {
            path: parent.to_path_buf(),
            source,
        })?;

    joined.push(prefix);
    joined.push(MAIN_SEPARATOR_STR);
    joined.push(name);

    Ok(PathBuf::from(joined))
}

/// Check whether `path` is exactly the root separator.
pub fn is_root(path: &Path) -> bool {
    path.as_os_str() == OsStr::new(MAIN_SEPARATOR_STR)
}

/// Check for the `.` and `..` pseudo-entries.
pub fn is_dot_entry(name: &OsStr) -> bool {
    name == OsStr::new(".") || name == OsStr::new("..")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_child_path_root_has_single_separator() {
        let path = child_path(Path::new("/"), OsStr::new("etc")).unwrap();
        assert_eq!(path, PathBuf::from("/etc"));
    }

    #[cfg(unix)]
    #[test]
    fn test_child_path_nested() {
        let path = child_path(Path::new("/a"), OsStr::new("b")).unwrap();
        assert_eq!(path, PathBuf::from("/a/b"));

        let path = child_path(Path::new("."), OsStr::new("src")).unwrap();
        assert_eq!(path.as_os_str(), OsStr::new("./src"));
    }

    #[test]
    fn test_dot_entries() {
        assert!(is_dot_entry(OsStr::new(".")));
        assert!(is_dot_entry(OsStr::new("..")));
        assert!(!is_dot_entry(OsStr::new("...")));
        assert!(!is_dot_entry(OsStr::new(".hidden")));
    }
}
