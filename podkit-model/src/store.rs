//! Registry of live objects.
//!
//! The store maps identifiers to shared [`ObjectRef`]s in insertion order and
//! keeps a secondary index from storage ids to identifiers. It is an explicit
//! context object: adapters and objects are handed an `Arc<Store>` rather
//! than reaching for a global.

use crate::object::{ObjectRef, DEFAULT_STORAGE_TYPE};
use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, warn};

/// Process- or request-scoped registry of schema objects.
#[derive(Debug, Default)]
pub struct Store {
    inner: RwLock<StoreInner>,
    /// Host bootstrap signal.
    initialized: AtomicBool,
    /// Bumped on every membership change.
    generation: AtomicU64,
}

#[derive(Debug, Default)]
struct StoreInner {
    objects: IndexMap<String, ObjectRef>,
    /// Storage id to identifier.
    ids: HashMap<String, String>,
}

impl Store {
    /// Creates an empty registry.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers an object under its identifier, replacing any previous entry.
    ///
    /// Returns `false` if the object has no identifier.
    pub fn register_object(&self, object: &ObjectRef) -> bool {
        let Some(identifier) = object.identifier() else {
            warn!("Refusing to register object without identifier");
            return false;
        };
        let id = object.id();

        let mut inner = self.write();
        inner.ids.retain(|_, target| target != &identifier);
        if let Some(id) = id {
            inner.ids.insert(id, identifier.clone());
        }
        inner.objects.insert(identifier.clone(), Arc::clone(object));
        self.bump();

        debug!(identifier = %identifier, "Object registered");
        true
    }

    /// Removes the entry for the object's identifier.
    ///
    /// Returns whether an entry was removed.
    pub fn unregister_object(&self, object: &ObjectRef) -> bool {
        let Some(identifier) = object.identifier() else {
            return false;
        };

        let mut inner = self.write();
        inner.ids.retain(|_, target| target != &identifier);
        let removed = inner.objects.shift_remove(&identifier).is_some();

        if removed {
            self.bump();
            debug!(identifier = %identifier, "Object unregistered");
        }
        removed
    }

    /// Looks an object up by identifier, falling back to its storage id.
    pub fn get_object(&self, key: &str) -> Option<ObjectRef> {
        let inner = self.read();
        if let Some(object) = inner.objects.get(key) {
            return Some(Arc::clone(object));
        }
        let identifier = inner.ids.get(key)?;
        inner.objects.get(identifier).cloned()
    }

    /// Looks an object up by storage id only.
    pub fn get_object_by_id(&self, id: &str) -> Option<ObjectRef> {
        let inner = self.read();
        let identifier = inner.ids.get(id)?;
        inner.objects.get(identifier).cloned()
    }

    /// Returns the objects whose storage type is one of `compatible_types`,
    /// keyed by identifier in registration order.
    ///
    /// Objects without a storage type count as [`DEFAULT_STORAGE_TYPE`].
    pub fn get_objects(&self, compatible_types: &[&str]) -> IndexMap<String, ObjectRef> {
        self.read()
            .objects
            .iter()
            .filter(|(_, object)| {
                let storage_type = object
                    .storage_type()
                    .unwrap_or_else(|| DEFAULT_STORAGE_TYPE.to_string());
                compatible_types.contains(&storage_type.as_str())
            })
            .map(|(identifier, object)| (identifier.clone(), Arc::clone(object)))
            .collect()
    }

    /// Returns every registered object keyed by identifier.
    pub fn all_objects(&self) -> IndexMap<String, ObjectRef> {
        self.read().objects.clone()
    }

    /// Number of registered objects.
    pub fn len(&self) -> usize {
        self.read().objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().objects.is_empty()
    }

    /// Drops every registered object.
    pub fn flush(&self) {
        let mut inner = self.write();
        inner.objects.clear();
        inner.ids.clear();
        self.bump();
    }

    fn bump(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
    }

    /// Membership generation. Any registration, removal or flush changes it,
    /// so results computed under an older generation may be stale.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Signals that the host finished bootstrapping. Query caches are only
    /// consulted after this point.
    pub fn mark_initialized(&self) {
        self.initialized.store(true, Ordering::Release);
    }

    /// Whether the host finished bootstrapping.
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }
}
