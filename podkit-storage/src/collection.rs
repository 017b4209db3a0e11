//! Collection storage: objects held in the in-memory registry.

use crate::config::StorageConfig;
use crate::query::{FindQuery, FindResult, NormalizedQuery};
use crate::storage::Storage;
use podkit_model::{ObjectRef, Store};
use podkit_types::is_truthy;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Storage types a collection adapter can see in the registry.
pub const COLLECTION_COMPATIBLE_TYPES: &[&str] = &["collection", "file"];

/// Storage adapter backed by the [`Store`] registry.
///
/// Saving registers the object; deleting unregisters it along with the
/// groups and fields it owns. Finds scan a snapshot of the registry and are
/// cached per normalized query once the host is initialized. Cache entries
/// are stamped with the store generation, so membership changes made through
/// any adapter (or directly on the store) invalidate them.
#[derive(Debug)]
pub struct Collection {
    store: Arc<Store>,
    config: StorageConfig,
    storage_type: &'static str,
    label: String,
    compatible_types: &'static [&'static str],
    cache: Mutex<HashMap<String, CachedFind>>,
    scans: AtomicUsize,
}

impl Collection {
    /// Creates a collection adapter over `store`.
    pub fn new(store: Arc<Store>, config: StorageConfig) -> Self {
        Self::with_type(store, config, "collection", "Code", COLLECTION_COMPATIBLE_TYPES)
    }

    /// Creates a registry-backed adapter with a different storage type.
    pub fn with_type(
        store: Arc<Store>,
        config: StorageConfig,
        storage_type: &'static str,
        label: impl Into<String>,
        compatible_types: &'static [&'static str],
    ) -> Self {
        Self {
            store,
            config,
            storage_type,
            label: label.into(),
            compatible_types,
            cache: Mutex::new(HashMap::new()),
            scans: AtomicUsize::new(0),
        }
    }

    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Number of registry scans performed (cache hits do not scan).
    pub fn scan_count(&self) -> usize {
        self.scans.load(Ordering::Relaxed)
    }

    /// Drops all cached find results.
    pub fn clear_cache(&self) {
        self.cache().clear();
    }

    fn cache(&self) -> MutexGuard<'_, HashMap<String, CachedFind>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn use_cache(&self) -> bool {
        self.config.cache_finds && self.store.is_initialized()
    }

    /// Scans the registry. `None` means a filter eliminated every candidate
    /// before the limit was applied.
    fn scan(&self, query: &NormalizedQuery) -> Option<Vec<ObjectRef>> {
        self.scans.fetch_add(1, Ordering::Relaxed);

        let mut objects: Vec<ObjectRef> = self
            .store
            .get_objects(self.compatible_types)
            .into_values()
            .collect();
        debug!(
            storage_type = self.storage_type,
            candidates = objects.len(),
            "Scanning registry"
        );

        if objects.is_empty() {
            return None;
        }

        if !query.object_type.is_empty() {
            retain(&mut objects, |o| {
                o.object_type()
                    .is_some_and(|t| query.object_type.contains(&t))
            })?;
        }

        for (arg, filter) in &query.args {
            if let Some(filter) = filter.compile() {
                retain(&mut objects, |o| filter.matches(o, arg))?;
            }
        }

        if !query.id.is_empty() {
            retain(&mut objects, |o| {
                o.get_arg("id")
                    .and_then(|v| stored_id(&v))
                    .is_some_and(|id| query.id.contains(&id))
            })?;
        }

        if !query.name.is_empty() {
            retain(&mut objects, |o| {
                o.name().is_some_and(|n| query.name.contains(&n))
            })?;
        }

        if let Some(internal) = query.internal {
            objects.retain(|o| is_truthy(o.get_arg("internal").as_ref()) == internal);
        }

        objects.truncate(query.limit);
        Some(objects)
    }
}

/// A stored id as an exact integer. `"12abc"` or `-12` is not id 12.
fn stored_id(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Retains matching objects; `None` once nothing is left.
fn retain(objects: &mut Vec<ObjectRef>, keep: impl Fn(&ObjectRef) -> bool) -> Option<()> {
    objects.retain(keep);
    (!objects.is_empty()).then_some(())
}

#[derive(Debug)]
struct CachedFind {
    generation: u64,
    found: FindResult,
}

fn keyed_by_name(objects: Vec<ObjectRef>) -> FindResult {
    objects
        .into_iter()
        .map(|o| (o.name().unwrap_or_default(), o))
        .collect()
}

impl Storage for Collection {
    fn storage_type(&self) -> &'static str {
        self.storage_type
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn get(&self, query: &FindQuery) -> Option<ObjectRef> {
        let object_type = query.object_type.iter().find(|t| !t.trim().is_empty())?;
        let name = query.name.iter().find(|n| !n.trim().is_empty())?;

        let lookup = FindQuery::new()
            .object_type(object_type.as_str())
            .name(name.as_str())
            .limit(1);

        self.find(&lookup).into_values().next()
    }

    fn find(&self, query: &FindQuery) -> FindResult {
        if !query.is_scoped() {
            return FindResult::new();
        }

        let normalized = query.normalize(self.config.find_limit);
        let cache_key = normalized.cache_key().filter(|_| self.use_cache());
        let generation = self.store.generation();

        if let Some(key) = &cache_key {
            if let Some(cached) = self.cache().get(key) {
                if cached.generation == generation {
                    debug!(storage_type = self.storage_type, "Find cache hit");
                    return cached.found.clone();
                }
                debug!(storage_type = self.storage_type, "Find cache entry stale");
            }
        }

        let Some(objects) = self.scan(&normalized) else {
            return FindResult::new();
        };
        let found = keyed_by_name(objects);

        if let Some(key) = cache_key {
            self.cache().insert(
                key,
                CachedFind {
                    generation,
                    found: found.clone(),
                },
            );
        }

        found
    }

    fn save_object(&self, object: &ObjectRef) -> bool {
        if object.storage_type().is_none() {
            object.set_arg("object_storage_type", Value::from(self.storage_type));
        }

        self.store.register_object(object);
        self.clear_cache();
        true
    }

    fn save_args(&self, _object: &ObjectRef) -> bool {
        true
    }

    fn delete_object(&self, object: &ObjectRef) -> bool {
        // Unregistered before the cascade so a reference cycle cannot lead
        // back to it.
        self.store.unregister_object(object);

        let mut owned = object.fields();
        owned.extend(object.groups());

        for child in &owned {
            self.delete(child);
        }

        object.set_arg("id", Value::Null);
        self.clear_cache();
        true
    }
}
