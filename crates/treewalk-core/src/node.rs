//! Node descriptors produced for every visited filesystem entry.

use std::fs::FileType;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Longest basename kept in a [`Node`], in bytes (POSIX `NAME_MAX`).
pub const DEFAULT_MAX_NAME_LEN: usize = 255;

/// Filesystem-unique identifier of an entry (the inode number on Unix).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl NodeId {
    /// Create a new NodeId from a u64.
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

/// Classification of a filesystem entry.
///
/// The display and serialized forms are the fixed short tags printed by the
/// `[KIND] path` listing.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
pub enum NodeKind {
    /// Regular file.
    #[strum(to_string = "REG")]
    #[serde(rename = "REG")]
    Regular,
    /// Directory.
    #[strum(to_string = "DIR")]
    #[serde(rename = "DIR")]
    Directory,
    /// Character device.
    #[strum(to_string = "CHR")]
    #[serde(rename = "CHR")]
    CharDevice,
    /// Block device.
    #[strum(to_string = "BLK")]
    #[serde(rename = "BLK")]
    BlockDevice,
    /// Named pipe.
    #[strum(to_string = "FIO")]
    #[serde(rename = "FIO")]
    Fifo,
    /// Symbolic link (the link itself, never its target).
    #[strum(to_string = "LNK")]
    #[serde(rename = "LNK")]
    Symlink,
    /// Unix domain socket.
    #[strum(to_string = "SCK")]
    #[serde(rename = "SCK")]
    Socket,
    /// Type bits were missing or not recognized.
    #[strum(to_string = "UNK")]
    #[serde(rename = "UNK")]
    Unknown,
}

impl NodeKind {
    /// Check if this is a directory.
    pub fn is_dir(self) -> bool {
        self == NodeKind::Directory
    }

    /// Check if this is a symlink.
    pub fn is_symlink(self) -> bool {
        self == NodeKind::Symlink
    }

    /// Check if the kind could not be determined.
    pub fn is_unknown(self) -> bool {
        self == NodeKind::Unknown
    }
}

impl From<FileType> for NodeKind {
    fn from(file_type: FileType) -> Self {
        // Symlink first: a link-aware FileType never reports the target.
        if file_type.is_symlink() {
            return NodeKind::Symlink;
        }
        if file_type.is_dir() {
            return NodeKind::Directory;
        }
        if file_type.is_file() {
            return NodeKind::Regular;
        }
        special_kind(file_type)
    }
}

#[cfg(unix)]
fn special_kind(file_type: FileType) -> NodeKind {
    use std::os::unix::fs::FileTypeExt;

    if file_type.is_char_device() {
        NodeKind::CharDevice
    } else if file_type.is_block_device() {
        NodeKind::BlockDevice
    } else if file_type.is_fifo() {
        NodeKind::Fifo
    } else if file_type.is_socket() {
        NodeKind::Socket
    } else {
        NodeKind::Unknown
    }
}

#[cfg(not(unix))]
fn special_kind(_file_type: FileType) -> NodeKind {
    NodeKind::Unknown
}

/// Transient descriptor of one visited entry.
///
/// A node is built for a single traversal step and dropped once the visitor
/// has seen it (and, for directories, once the subtree is done).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Bare entry name. Empty for the filesystem root.
    pub name: CompactString,

    /// Filesystem-unique identifier.
    pub id: NodeId,

    /// Type of the entry itself.
    pub kind: NodeKind,
}

impl Node {
    /// Create a node, truncating `name` to [`DEFAULT_MAX_NAME_LEN`] bytes.
    pub fn new(name: &str, id: NodeId, kind: NodeKind) -> Self {
        Self::with_max_name_len(name, id, kind, DEFAULT_MAX_NAME_LEN)
    }

    /// Create a node, truncating `name` to `max_name_len` bytes.
    pub fn with_max_name_len(name: &str, id: NodeId, kind: NodeKind, max_name_len: usize) -> Self {
        Self {
            name: CompactString::from(truncate_name(name, max_name_len)),
            id,
            kind,
        }
    }

    /// Check if this node is a directory.
    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }

    /// Check if the node's kind is an untrustworthy hint that needs a metadata lookup.
    pub fn needs_resolution(&self) -> bool {
        self.kind.is_unknown()
    }
}

/// Cut `name` to at most `max_len` bytes without splitting a UTF-8 character.
pub fn truncate_name(name: &str, max_len: usize) -> &str {
    if name.len() <= max_len {
        return name;
    }
    let mut end = max_len;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    &name[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_tags() {
        assert_eq!(NodeKind::Regular.to_string(), "REG");
        assert_eq!(NodeKind::Directory.to_string(), "DIR");
        assert_eq!(NodeKind::Fifo.to_string(), "FIO");
        assert_eq!(NodeKind::Unknown.to_string(), "UNK");
    }

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name("hello", 10), "hello");
        assert_eq!(truncate_name("hello", 3), "hel");
        assert_eq!(truncate_name("", 3), "");
        // "é" is two bytes; never split it
        assert_eq!(truncate_name("aé", 2), "a");
    }

    #[test]
    fn test_node_creation() {
        let node = Node::new("sub", NodeId::new(7), NodeKind::Directory);
        assert!(node.is_dir());
        assert!(!node.needs_resolution());
        assert_eq!(node.name.as_str(), "sub");
        assert_eq!(node.id, NodeId(7));
    }

    #[test]
    fn test_long_name_is_bounded() {
        let long = "x".repeat(DEFAULT_MAX_NAME_LEN + 40);
        let node = Node::new(&long, NodeId::default(), NodeKind::Regular);
        assert_eq!(node.name.len(), DEFAULT_MAX_NAME_LEN);
    }
}
