//! Depth-first filesystem traversal engine for treewalk.
//!
//! Given one or more starting paths, the walker visits every reachable
//! entry exactly once, classifies it from link-aware metadata and hands it
//! to a [`Visitor`] before descending into its children.
//!
//! # Overview
//!
//! - **Resolver**: builds a [`Node`] from a metadata query that never follows
//!   a final symlink
//! - **Walker**: enumerates directories, builds child paths and falls back to
//!   the resolver whenever a directory listing cannot classify an entry
//! - **Visitors**: `[KIND] path` printer, JSON-lines printer, and an
//!   in-memory collector
//!
//! # Example
//!
//! ```rust,no_run
//! use treewalk_walk::{KindPrinter, TreeWalker};
//!
//! let mut walker = TreeWalker::new();
//! let mut printer = KindPrinter::new(std::io::stdout());
//! let stats = walker.walk(&["."], &mut printer);
//! printer.finish().unwrap();
//!
//! eprintln!("{stats}");
//! ```
//!
//! Sibling order is whatever the operating system yields; only pre-order
//! across levels is guaranteed.

mod path;
mod resolver;
mod visitor;
mod walker;

pub use path::{child_path, is_dot_entry, is_root};
pub use resolver::{Resolver, basename, resolve};
pub use visitor::{JsonLinesPrinter, KindPrinter, NodeCollector, Visitor};
pub use walker::TreeWalker;

// Re-export core types for convenience
pub use treewalk_core::{
    Node, NodeId, NodeKind, Strategy, WalkConfig, WalkError, WalkStats, WalkWarning, WarningKind,
};
