//! Authoritative node resolution from filesystem metadata.

use std::borrow::Cow;
use std::fs::Metadata;
use std::path::Path;

use treewalk_core::{DEFAULT_MAX_NAME_LEN, Node, NodeId, NodeKind, WalkError};

/// Builds [`Node`]s from a link-aware metadata query.
///
/// The query never follows a final symlink, so a link is always reported as
/// [`NodeKind::Symlink`] rather than as whatever it points at.
#[derive(Debug, Clone, Copy)]
pub struct Resolver {
    max_name_len: usize,
}

impl Resolver {
    /// Create a resolver that bounds names to `max_name_len` bytes.
    pub fn new(max_name_len: usize) -> Self {
        Self { max_name_len }
    }

    /// Resolve the entry at `path`.
    ///
    /// Fails with [`WalkError::MetadataUnavailable`] when the entry vanished,
    /// is not accessible, or the path is broken. The caller decides what to
    /// report; nothing is logged here.
    pub fn resolve(&self, path: &Path) -> Result<Node, WalkError> {
        let metadata =
            std::fs::symlink_metadata(path).map_err(|source| WalkError::MetadataUnavailable {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Node::with_max_name_len(
            &basename(path),
            NodeId::new(get_ino(&metadata)),
            NodeKind::from(metadata.file_type()),
            self.max_name_len,
        ))
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_NAME_LEN)
    }
}

/// Resolve `path` with the default name bound.
pub fn resolve(path: &Path) -> Result<Node, WalkError> {
    Resolver::default().resolve(path)
}

/// Everything after the last separator of `path`.
///
/// A path without a separator is its own name, and the root path `/` yields
/// the empty name. Non-UTF-8 bytes are replaced.
pub fn basename(path: &Path) -> Cow<'_, str> {
    let bytes = path.as_os_str().as_encoded_bytes();
    let name = match bytes.iter().rposition(|&b| is_separator_byte(b)) {
        Some(idx) => &bytes[idx + 1..],
        None => bytes,
    };
    String::from_utf8_lossy(name)
}

fn is_separator_byte(b: u8) -> bool {
    b.is_ascii() && std::path::is_separator(b as char)
}

/// Get the inode number from metadata.
#[cfg(unix)]
fn get_ino(metadata: &Metadata) -> u64 {
    use std::os::unix::fs::MetadataExt;
    metadata.ino()
}

#[cfg(not(unix))]
fn get_ino(_metadata: &Metadata) -> u64 {
    0 // No inodes on this platform
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_basename() {
        assert_eq!(basename(Path::new("/a/b/c.txt")), "c.txt");
        assert_eq!(basename(Path::new("relative")), "relative");
        assert_eq!(basename(Path::new(".")), ".");
        assert_eq!(basename(Path::new("/")), "");
        assert_eq!(basename(Path::new("dir/")), "");
    }

    #[test]
    fn test_resolve_file_and_dir() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("f.txt");
        fs::write(&file, "hello").unwrap();

        let node = resolve(&file).unwrap();
        assert_eq!(node.kind, NodeKind::Regular);
        assert_eq!(node.name.as_str(), "f.txt");

        let node = resolve(temp.path()).unwrap();
        assert_eq!(node.kind, NodeKind::Directory);
    }

    #[test]
    fn test_resolve_missing_path() {
        let temp = TempDir::new().unwrap();
        let err = resolve(&temp.path().join("missing")).unwrap_err();
        assert!(matches!(err, WalkError::MetadataUnavailable { .. }));
    }

    #[test]
    fn test_resolver_name_bound() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("abcdefgh");
        fs::write(&file, "").unwrap();

        let node = Resolver::new(3).resolve(&file).unwrap();
        assert_eq!(node.name.as_str(), "abc");
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_ids_match_metadata() {
        use std::os::unix::fs::MetadataExt;

        let temp = TempDir::new().unwrap();
        let file = temp.path().join("f");
        fs::write(&file, "").unwrap();

        let node = resolve(&file).unwrap();
        assert_eq!(node.id.0, fs::metadata(&file).unwrap().ino());
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_symlink_to_dir_is_symlink() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("real")).unwrap();
        std::os::unix::fs::symlink(temp.path().join("real"), temp.path().join("link")).unwrap();

        let node = resolve(&temp.path().join("link")).unwrap();
        assert_eq!(node.kind, NodeKind::Symlink);
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_root_and_devices() {
        let node = resolve(Path::new("/")).unwrap();
        assert_eq!(node.kind, NodeKind::Directory);
        assert!(node.name.is_empty());

        let node = resolve(Path::new("/dev/null")).unwrap();
        assert_eq!(node.kind, NodeKind::CharDevice);
        assert_eq!(node.name.as_str(), "null");
    }
}
