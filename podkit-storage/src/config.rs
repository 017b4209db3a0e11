//! Storage configuration.

use crate::error::StorageResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Maximum number of objects a find returns when the query sets no limit.
pub const DEFAULT_FIND_LIMIT: usize = 300;

/// Configuration shared by the storage adapters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Limit applied to finds without an explicit limit.
    pub find_limit: usize,
    /// Storage type used for objects that do not declare one.
    pub default_storage: String,
    /// Whether find results are cached after bootstrap.
    pub cache_finds: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            find_limit: DEFAULT_FIND_LIMIT,
            default_storage: "collection".to_string(),
            cache_finds: true,
        }
    }
}

impl StorageConfig {
    /// Parses a TOML configuration. Missing keys keep their defaults.
    pub fn from_toml_str(s: &str) -> StorageResult<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Reads and parses a TOML configuration file.
    pub fn from_path(path: &Path) -> StorageResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
