//! Error types for traversal operations.

use std::collections::TryReserveError;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while walking a tree.
///
/// Traversal errors are handled at the frame where they happen: the walker
/// reports them and moves on to the next entry or root.
#[derive(Debug, Error)]
pub enum WalkError {
    /// Could not reserve memory for a child path.
    #[error("{path}: cannot allocate path: {source}")]
    AllocationFailure {
        path: PathBuf,
        #[source]
        source: TryReserveError,
    },

    /// Entry could not be stat'd.
    #[error("{path}: cannot read metadata: {source}")]
    MetadataUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A directory could not be opened for enumeration.
    #[error("{path}: cannot open directory: {source}")]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading the next directory entry failed.
    #[error("{path}: cannot read directory entry: {source}")]
    EnumerationError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl WalkError {
    /// Path the error is tied to, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::AllocationFailure { path, .. }
            | Self::MetadataUnavailable { path, .. }
            | Self::DirectoryUnreadable { path, .. }
            | Self::EnumerationError { path, .. } => Some(path),
            Self::InvalidConfig { .. } => None,
        }
    }

    /// Warning kind for a traversal error, `None` for configuration errors.
    pub fn warning_kind(&self) -> Option<WarningKind> {
        match self {
            Self::AllocationFailure { .. } => Some(WarningKind::AllocationFailure),
            Self::MetadataUnavailable { .. } => Some(WarningKind::MetadataUnavailable),
            Self::DirectoryUnreadable { .. } => Some(WarningKind::DirectoryUnreadable),
            Self::EnumerationError { .. } => Some(WarningKind::EnumerationError),
            Self::InvalidConfig { .. } => None,
        }
    }
}

/// Kind of traversal warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// Path buffer could not be allocated; the entry was skipped.
    AllocationFailure,
    /// Entry could not be stat'd; no visit happened.
    MetadataUnavailable,
    /// Directory was visited but its children were skipped.
    DirectoryUnreadable,
    /// Enumeration stopped early; remaining siblings were skipped.
    EnumerationError,
}

/// Non-fatal problem recorded during a walk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkWarning {
    /// Path where the warning occurred.
    pub path: PathBuf,
    /// Human-readable message, including the OS error text.
    pub message: String,
    /// Kind of warning.
    pub kind: WarningKind,
}

impl WalkWarning {
    /// Create a new walk warning.
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>, kind: WarningKind) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            kind,
        }
    }

    /// Build a warning from a traversal error. Returns `None` for
    /// configuration errors, which never occur mid-walk.
    pub fn from_error(error: &WalkError) -> Option<Self> {
        let kind = error.warning_kind()?;
        let path = error.path().cloned().unwrap_or_default();
        Some(Self::new(path, error.to_string(), kind))
    }
}

impl std::fmt::Display for WalkWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}
