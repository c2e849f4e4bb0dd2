//! Visitor contract and the stock visitors.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use treewalk_core::{Node, NodeKind};

/// Callback invoked once per visited entry, in pre-order.
///
/// Calls happen synchronously on the walking thread. The node is only
/// borrowed for the duration of the call.
pub trait Visitor {
    fn visit(&mut self, path: &Path, node: &Node);
}

impl<F> Visitor for F
where
    F: FnMut(&Path, &Node),
{
    fn visit(&mut self, path: &Path, node: &Node) {
        self(path, node)
    }
}

/// Writer wrapper that keeps the first I/O error and drops later output.
#[derive(Debug)]
struct LatchedWriter<W> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> LatchedWriter<W> {
    fn new(out: W) -> Self {
        Self { out, error: None }
    }

    fn emit(&mut self, write: impl FnOnce(&mut W) -> io::Result<()>) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = write(&mut self.out) {
            self.error = Some(e);
        }
    }

    fn finish(&mut self) -> io::Result<()> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.out.flush()
    }
}

/// Prints one `[KIND] path` line per node.
#[derive(Debug)]
pub struct KindPrinter<W: Write> {
    writer: LatchedWriter<W>,
}

impl<W: Write> KindPrinter<W> {
    pub fn new(out: W) -> Self {
        Self {
            writer: LatchedWriter::new(out),
        }
    }

    /// Flush output, returning the first write error if one occurred.
    pub fn finish(&mut self) -> io::Result<()> {
        self.writer.finish()
    }

    pub fn into_inner(self) -> W {
        self.writer.out
    }
}

impl<W: Write> Visitor for KindPrinter<W> {
    fn visit(&mut self, path: &Path, node: &Node) {
        self.writer.emit(|out| {
            write!(out, "[{}] ", node.kind)?;
            write_path(out, path)?;
            out.write_all(b"\n")
        });
    }
}

/// Write the path exactly as the OS spelled it.
#[cfg(unix)]
fn write_path(out: &mut impl Write, path: &Path) -> io::Result<()> {
    use std::os::unix::ffi::OsStrExt;
    out.write_all(path.as_os_str().as_bytes())
}

#[cfg(not(unix))]
fn write_path(out: &mut impl Write, path: &Path) -> io::Result<()> {
    write!(out, "{}", path.display())
}

/// One JSON object per line.
#[derive(Serialize)]
struct NodeRecord<'a> {
    path: &'a str,
    name: &'a str,
    id: u64,
    kind: NodeKind,
}

/// Prints each node as a JSON line: `{"path":…,"name":…,"id":…,"kind":"REG"}`.
#[derive(Debug)]
pub struct JsonLinesPrinter<W: Write> {
    writer: LatchedWriter<W>,
}

impl<W: Write> JsonLinesPrinter<W> {
    pub fn new(out: W) -> Self {
        Self {
            writer: LatchedWriter::new(out),
        }
    }

    /// Flush output, returning the first write error if one occurred.
    pub fn finish(&mut self) -> io::Result<()> {
        self.writer.finish()
    }

    pub fn into_inner(self) -> W {
        self.writer.out
    }
}

impl<W: Write> Visitor for JsonLinesPrinter<W> {
    fn visit(&mut self, path: &Path, node: &Node) {
        let path = path.to_string_lossy();
        let record = NodeRecord {
            path: &path,
            name: &node.name,
            id: node.id.0,
            kind: node.kind,
        };
        self.writer.emit(|out| {
            serde_json::to_writer(&mut *out, &record)?;
            out.write_all(b"\n")
        });
    }
}

/// Collects every visited `(path, node)` pair in visit order.
#[derive(Debug, Clone, Default)]
pub struct NodeCollector {
    entries: Vec<(PathBuf, Node)>,
}

impl NodeCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Visited entries in visit order.
    pub fn entries(&self) -> &[(PathBuf, Node)] {
        &self.entries
    }

    /// Visited paths in visit order.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.entries.iter().map(|(p, _)| p.as_path())
    }

    /// Node recorded for `path`, if it was visited.
    pub fn get(&self, path: &Path) -> Option<&Node> {
        self.entries
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, node)| node)
    }

    /// Position of `path` in the visit order.
    pub fn position(&self, path: &Path) -> Option<usize> {
        self.entries.iter().position(|(p, _)| p == path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Visitor for NodeCollector {
    fn visit(&mut self, path: &Path, node: &Node) {
        self.entries.push((path.to_path_buf(), node.clone()));
    }
}
