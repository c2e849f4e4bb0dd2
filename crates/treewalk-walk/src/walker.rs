//! Depth-first, pre-order tree walker.

use std::ffi::{OsStr, OsString};
use std::fs::{DirEntry, ReadDir};
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use treewalk_core::{
    Node, NodeId, NodeKind, Strategy, WalkConfig, WalkError, WalkStats, WalkWarning,
};

use crate::path::{child_path, is_dot_entry};
use crate::resolver::Resolver;
use crate::visitor::Visitor;

/// A traversal session.
///
/// Owns the configuration, the running counters and the warnings recorded
/// along the way. Counters and warnings accumulate across every root walked
/// with the same session.
#[derive(Debug)]
pub struct TreeWalker {
    config: WalkConfig,
    resolver: Resolver,
    stats: WalkStats,
    warnings: Vec<WalkWarning>,
}

/// Entry waiting on the work-list.
struct Pending {
    path: PathBuf,
    hint: Option<Node>,
}

impl TreeWalker {
    /// Create a walker with the default configuration.
    pub fn new() -> Self {
        Self::with_config(WalkConfig::default())
    }

    /// Create a walker with the given configuration.
    pub fn with_config(config: WalkConfig) -> Self {
        Self {
            resolver: Resolver::new(config.max_name_len),
            config,
            stats: WalkStats::new(),
            warnings: Vec::new(),
        }
    }

    /// Counters so far.
    pub fn stats(&self) -> WalkStats {
        self.stats
    }

    /// Warnings recorded so far, in the order they happened.
    pub fn warnings(&self) -> &[WalkWarning] {
        &self.warnings
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Walk each root in order as an independent tree.
    pub fn walk<P, V>(&mut self, roots: &[P], visitor: &mut V) -> WalkStats
    where
        P: AsRef<Path>,
        V: Visitor + ?Sized,
    {
        debug!(strategy = %self.config.strategy, roots = roots.len(), "starting walk");
        for root in roots {
            self.walk_root(root.as_ref(), visitor);
        }
        self.stats
    }

    /// Walk a single root with the configured strategy.
    pub fn walk_root<V>(&mut self, root: &Path, visitor: &mut V)
    where
        V: Visitor + ?Sized,
    {
        match self.config.strategy {
            Strategy::Recursive => self.visit_node(root, None, visitor),
            Strategy::WorkList => self.walk_work_list(root, visitor),
        }
    }

    /// Visit `path` and, if it is a directory, everything below it.
    ///
    /// A missing hint, or one whose kind is [`NodeKind::Unknown`], is replaced
    /// by an authoritative metadata lookup. If that lookup fails the entry is
    /// reported and skipped.
    ///
    /// Always recurses on the call stack, whatever the configured strategy.
    /// Use [`walk_root`](Self::walk_root) to honour [`Strategy::WorkList`].
    pub fn visit_node<V>(&mut self, path: &Path, hint: Option<Node>, visitor: &mut V)
    where
        V: Visitor + ?Sized,
    {
        if !self.enter(path, hint, visitor) {
            return;
        }
        if let Some(dir) = self.open_dir(path) {
            self.walk_tree(path, dir, visitor);
        }
    }

    /// Visit every child of the open directory `dir`, recursing into
    /// subdirectories. The handle is consumed and closed before returning.
    pub fn walk_tree<V>(&mut self, path: &Path, dir: ReadDir, visitor: &mut V)
    where
        V: Visitor + ?Sized,
    {
        self.walk_entries(path, dir, visitor);
    }

    fn walk_entries<I, E, V>(&mut self, path: &Path, entries: I, visitor: &mut V)
    where
        I: IntoIterator<Item = io::Result<E>>,
        E: ListedEntry,
        V: Visitor + ?Sized,
    {
        self.for_each_child(path, entries, |walker, child, hint| {
            walker.visit_node(&child, Some(hint), visitor);
        });
    }

    fn walk_work_list<V>(&mut self, root: &Path, visitor: &mut V)
    where
        V: Visitor + ?Sized,
    {
        let mut pending = vec![Pending {
            path: root.to_path_buf(),
            hint: None,
        }];

        while let Some(Pending { path, hint }) = pending.pop() {
            if !self.enter(&path, hint, visitor) {
                continue;
            }
            let Some(dir) = self.open_dir(&path) else {
                continue;
            };

            let mark = pending.len();
            self.for_each_child(&path, dir, |_, child, hint| {
                pending.push(Pending {
                    path: child,
                    hint: Some(hint),
                });
            });
            // LIFO: reverse so children pop in enumeration order
            pending[mark..].reverse();
        }
    }

    /// Resolve, count and visit one entry. Returns `true` when the entry is a
    /// directory whose children should be walked next.
    fn enter<V>(&mut self, path: &Path, hint: Option<Node>, visitor: &mut V) -> bool
    where
        V: Visitor + ?Sized,
    {
        let node = match hint {
            Some(node) if !node.needs_resolution() => node,
            _ => match self.resolver.resolve(path) {
                Ok(node) => node,
                Err(e) => {
                    self.report(e);
                    return false;
                }
            },
        };

        self.stats.record_node();
        visitor.visit(path, &node);

        if node.is_dir() {
            self.stats.record_dir();
            return true;
        }
        false
    }

    fn open_dir(&mut self, path: &Path) -> Option<ReadDir> {
        match std::fs::read_dir(path) {
            Ok(dir) => {
                debug!(path = %path.display(), "entering directory");
                Some(dir)
            }
            Err(source) => {
                self.report(WalkError::DirectoryUnreadable {
                    path: path.to_path_buf(),
                    source,
                });
                None
            }
        }
    }

    /// Enumerate `dir`, handing each real child's path and cheap hint to
    /// `on_child`. A read error ends the enumeration of this directory.
    fn for_each_child<I, E, F>(&mut self, path: &Path, entries: I, mut on_child: F)
    where
        I: IntoIterator<Item = io::Result<E>>,
        E: ListedEntry,
        F: FnMut(&mut Self, PathBuf, Node),
    {
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(source) => {
                    self.report(WalkError::EnumerationError {
                        path: path.to_path_buf(),
                        source,
                    });
                    break;
                }
            };

            let name = entry.file_name();
            if is_dot_entry(&name) {
                continue;
            }

            let child = match entry.join_onto(path, &name) {
                Ok(child) => child,
                Err(e) => {
                    self.report(e);
                    continue;
                }
            };

            let hint = entry.hint(self.config.max_name_len);
            on_child(self, child, hint);
        }
    }

    fn report(&mut self, error: WalkError) {
        if let Some(warning) = WalkWarning::from_error(&error) {
            warn!(kind = ?warning.kind, "{}", warning.message);
            self.warnings.push(warning);
        }
    }
}

impl Default for TreeWalker {
    fn default() -> Self {
        Self::new()
    }
}

/// One item of a directory listing.
trait ListedEntry {
    fn file_name(&self) -> OsString;

    /// Node built from the listing alone, without a metadata query of our
    /// own. Its kind is [`NodeKind::Unknown`] when the listing could not
    /// classify the entry.
    fn hint(&self, max_name_len: usize) -> Node;

    fn join_onto(&self, parent: &Path, name: &OsStr) -> Result<PathBuf, WalkError> {
        child_path(parent, name)
    }
}

impl ListedEntry for DirEntry {
    fn file_name(&self) -> OsString {
        DirEntry::file_name(self)
    }

    fn hint(&self, max_name_len: usize) -> Node {
        let kind = self
            .file_type()
            .map(NodeKind::from)
            .unwrap_or(NodeKind::Unknown);

        Node::with_max_name_len(
            &self.file_name().to_string_lossy(),
            NodeId::new(entry_ino(self)),
            kind,
            max_name_len,
        )
    }
}

/// Inode number straight from the directory entry.
#[cfg(unix)]
fn entry_ino(entry: &DirEntry) -> u64 {
    use std::os::unix::fs::DirEntryExt;
    entry.ino()
}

#[cfg(not(unix))]
fn entry_ino(_entry: &DirEntry) -> u64 {
    0
}
