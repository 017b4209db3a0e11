//! Storage dispatcher: adapters selected by storage type tag.

use crate::collection::Collection;
use crate::config::StorageConfig;
use crate::error::{StorageError, StorageResult};
use crate::file::FileStorage;
use crate::storage::Storage;
use podkit_model::{Object, Store};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Table of storage adapters keyed by their storage type tag.
pub struct StorageRegistry {
    adapters: HashMap<&'static str, Arc<dyn Storage>>,
    default_storage: String,
}

impl StorageRegistry {
    /// Creates an empty registry that falls back to `default_storage`.
    pub fn new(default_storage: impl Into<String>) -> Self {
        Self {
            adapters: HashMap::new(),
            default_storage: default_storage.into(),
        }
    }

    /// Creates a registry with the `collection` and `file` adapters over
    /// `store`.
    pub fn with_defaults(store: &Arc<Store>, config: &StorageConfig) -> Self {
        let mut registry = Self::new(config.default_storage.clone());
        registry.register(Arc::new(Collection::new(Arc::clone(store), config.clone())));
        registry.register(Arc::new(FileStorage::new(Arc::clone(store), config.clone())));
        registry
    }

    /// Installs an adapter under its storage type, returning the one it
    /// replaced.
    pub fn register(&mut self, adapter: Arc<dyn Storage>) -> Option<Arc<dyn Storage>> {
        let storage_type = adapter.storage_type();
        debug!(storage_type, "Storage adapter registered");
        self.adapters.insert(storage_type, adapter)
    }

    /// Returns the adapter for a storage type.
    pub fn get(&self, storage_type: &str) -> Option<Arc<dyn Storage>> {
        self.adapters.get(storage_type).cloned()
    }

    /// Returns the adapter for a storage type or an error naming it.
    pub fn require(&self, storage_type: &str) -> StorageResult<Arc<dyn Storage>> {
        self.get(storage_type)
            .ok_or_else(|| StorageError::UnknownStorageType(storage_type.to_string()))
    }

    /// The configured fallback adapter.
    pub fn default_adapter(&self) -> Option<Arc<dyn Storage>> {
        self.get(&self.default_storage)
    }

    /// Selects the adapter for an object by its storage type tag, falling back
    /// to the default adapter.
    pub fn for_object(&self, object: &Object) -> Option<Arc<dyn Storage>> {
        object
            .storage_type()
            .and_then(|storage_type| self.get(&storage_type))
            .or_else(|| self.default_adapter())
    }

    /// Registered storage types, sorted.
    pub fn types(&self) -> Vec<&'static str> {
        let mut types: Vec<_> = self.adapters.keys().copied().collect();
        types.sort_unstable();
        types
    }
}

impl fmt::Debug for StorageRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageRegistry")
            .field("types", &self.types())
            .field("default_storage", &self.default_storage)
            .finish()
    }
}
