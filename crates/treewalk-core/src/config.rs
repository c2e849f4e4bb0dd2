//! Walk configuration types.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::error::WalkError;
use crate::node::DEFAULT_MAX_NAME_LEN;

/// How the walker keeps track of pending directories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Strategy {
    /// Recurse on the native call stack, keeping each directory open while
    /// its children are visited.
    #[default]
    Recursive,
    /// Explicit LIFO work-list. Native stack use stays bounded regardless of
    /// tree depth.
    WorkList,
}

/// Configuration for a traversal session.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate", error = "WalkError"))]
pub struct WalkConfig {
    /// Traversal strategy.
    #[builder(default)]
    #[serde(default)]
    pub strategy: Strategy,

    /// Longest node name kept, in bytes. Longer names are truncated.
    #[builder(default = "DEFAULT_MAX_NAME_LEN")]
    #[serde(default = "default_max_name_len")]
    pub max_name_len: usize,
}

fn default_max_name_len() -> usize {
    DEFAULT_MAX_NAME_LEN
}

impl WalkConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if self.max_name_len == Some(0) {
            return Err("max_name_len must be greater than zero".to_string());
        }
        Ok(())
    }
}

impl From<derive_builder::UninitializedFieldError> for WalkError {
    fn from(err: derive_builder::UninitializedFieldError) -> Self {
        WalkError::InvalidConfig {
            message: err.to_string(),
        }
    }
}

impl From<String> for WalkError {
    fn from(message: String) -> Self {
        WalkError::InvalidConfig { message }
    }
}

impl WalkConfig {
    /// Create a new walk config builder.
    pub fn builder() -> WalkConfigBuilder {
        WalkConfigBuilder::default()
    }

    /// Default configuration with the given strategy.
    pub fn with_strategy(strategy: Strategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Recursive,
            max_name_len: DEFAULT_MAX_NAME_LEN,
        }
    }
}
