//! Running totals for a traversal session.

use serde::{Deserialize, Serialize};

/// Counters maintained while walking.
///
/// Every visited node bumps `nodes` exactly once; directories bump
/// `directories` once more. Entries that could not be resolved are not
/// counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkStats {
    /// Total nodes visited.
    pub nodes: u64,
    /// Total directories visited.
    pub directories: u64,
}

impl WalkStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a visited node.
    pub fn record_node(&mut self) {
        self.nodes += 1;
    }

    /// Record a visited directory (in addition to [`record_node`](Self::record_node)).
    pub fn record_dir(&mut self) {
        self.directories += 1;
    }

    /// Nodes that are not directories.
    pub fn others(&self) -> u64 {
        self.nodes.saturating_sub(self.directories)
    }
}

impl std::fmt::Display for WalkStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Total: {} nodes, {} directories, {} others",
            self.nodes,
            self.directories,
            self.others()
        )
    }
}
