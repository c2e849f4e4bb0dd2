//! Core types for treewalk.
//!
//! This crate provides the data structures shared by the traversal engine
//! and its callers: entry nodes and kinds, errors and warnings, walk
//! configuration and session counters.

mod config;
mod error;
mod node;
mod stats;

pub use config::{Strategy, WalkConfig, WalkConfigBuilder};
pub use error::{WalkError, WalkWarning, WarningKind};
pub use node::{DEFAULT_MAX_NAME_LEN, Node, NodeId, NodeKind, truncate_name};
pub use stats::WalkStats;
