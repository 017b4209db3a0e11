//! The storage strategy interface.

use crate::query::{FindQuery, FindResult};
use podkit_model::ObjectRef;

/// A storage backend for schema objects.
///
/// Lookups never fail: missing or unscoped input yields `None` or an empty
/// result. Writes report success as a boolean.
pub trait Storage: Send + Sync {
    /// Storage type tag this adapter writes onto objects it saves.
    fn storage_type(&self) -> &'static str;

    /// Human readable name of the backend.
    fn label(&self) -> &str;

    /// Returns the object matching the query's object type and name.
    fn get(&self, query: &FindQuery) -> Option<ObjectRef>;

    /// Returns the objects matching the query, keyed by name.
    fn find(&self, query: &FindQuery) -> FindResult;

    /// Persists the object itself.
    fn save_object(&self, object: &ObjectRef) -> bool;

    /// Persists the object's arguments.
    fn save_args(&self, object: &ObjectRef) -> bool;

    /// Removes the object and everything it owns.
    fn delete_object(&self, object: &ObjectRef) -> bool;

    /// Saves the object, then its arguments.
    fn save(&self, object: &ObjectRef) -> bool {
        self.save_object(object) && self.save_args(object)
    }

    fn delete(&self, object: &ObjectRef) -> bool {
        self.delete_object(object)
    }
}
