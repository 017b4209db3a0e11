//! The schema object: one pod, group, field or other entity.

use crate::attribute::{Attribute, Relation};
use crate::error::ModelResult;
use crate::store::Store;
use podkit_types::{arg_to_string, identifier_from_args, is_empty_like, Args, ObjectType};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};

/// Shared handle to a live object. The [`Store`] and any caller holding the
/// object see the same instance.
pub type ObjectRef = Arc<Object>;

/// Storage type tag assigned to objects that do not declare one.
pub const DEFAULT_STORAGE_TYPE: &str = "collection";

/// Arguments that are normalized on write.
const RESERVED_ARGS: [&str; 10] = [
    "object_type",
    "object_storage_type",
    "fields",
    "options",
    "name",
    "id",
    "parent",
    "group",
    "label",
    "description",
];

/// Reserved arguments that can never be written after construction.
const READ_ONLY_ARGS: [&str; 3] = ["object_type", "fields", "options"];

/// A schema entity backed by an argument bag.
///
/// The object type is fixed at construction. Every other argument can be
/// changed through [`set_arg`](Self::set_arg); reserved arguments are trimmed
/// and empty-like values (`null`, `0`, `"0"`) are stored as `""`.
#[derive(Debug)]
pub struct Object {
    kind: ObjectType,
    args: RwLock<Args>,
    store: Weak<Store>,
}

/// The explicit persisted form of an object: only its arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedObject {
    pub args: Args,
}

impl Object {
    /// Creates an object bound to a registry context.
    pub fn new(store: &Arc<Store>, kind: ObjectType, args: Args) -> ObjectRef {
        Self::build(Arc::downgrade(store), kind, args)
    }

    /// Creates an object with no registry context. Parent and group lookups
    /// on it always resolve to `None`.
    pub fn detached(kind: ObjectType, args: Args) -> ObjectRef {
        Self::build(Weak::new(), kind, args)
    }

    fn build(store: Weak<Store>, kind: ObjectType, args: Args) -> ObjectRef {
        let object = Self {
            kind,
            args: RwLock::new(Args::new()),
            store,
        };
        object.setup(args);
        Arc::new(object)
    }

    /// Rebuilds an object from its persisted form, re-running setup.
    pub fn from_persisted_form(
        store: &Arc<Store>,
        kind: ObjectType,
        form: PersistedObject,
    ) -> ObjectRef {
        Self::new(store, kind, form.args)
    }

    /// Returns the persisted form of this object.
    pub fn to_persisted_form(&self) -> PersistedObject {
        PersistedObject {
            args: self.get_args(),
        }
    }

    /// Serializes the argument bag as JSON.
    pub fn to_json(&self) -> ModelResult<String> {
        Ok(serde_json::to_string(&*self.read())?)
    }

    /// Resets the argument bag to the defaults merged with `args`.
    ///
    /// An empty `args` re-applies the current arguments, rebuilding derived
    /// state in place.
    pub fn setup(&self, args: Args) {
        let args = if args.is_empty() { self.get_args() } else { args };

        let defaults = self.defaults();
        *self.write() = defaults.clone();

        let mut merged = defaults;
        merged.extend(args);

        for (arg, value) in merged {
            self.set_arg(&arg, value);
        }
    }

    fn defaults(&self) -> Args {
        let mut defaults = Args::new();
        defaults.insert("object_type".into(), Value::from(self.kind.as_str()));
        defaults.insert(
            "object_storage_type".into(),
            Value::from(DEFAULT_STORAGE_TYPE),
        );
        for key in ["name", "id", "parent", "group", "label", "description"] {
            defaults.insert(key.into(), Value::from(""));
        }
        defaults
    }

    fn read(&self) -> RwLockReadGuard<'_, Args> {
        self.args.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Args> {
        self.args.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// The registry this object was built with, if it is still alive.
    pub fn store(&self) -> Option<Arc<Store>> {
        self.store.upgrade()
    }

    /// The fixed object type.
    pub fn kind(&self) -> ObjectType {
        self.kind
    }

    /// Returns an argument value, or `None` when unset.
    pub fn get_arg(&self, arg: &str) -> Option<Value> {
        self.read().get(arg).cloned()
    }

    /// Sets an argument value.
    ///
    /// Writes to `object_type`, `fields` and `options` are ignored.
    pub fn set_arg(&self, arg: &str, value: Value) {
        let mut value = value;

        if RESERVED_ARGS.contains(&arg) {
            if READ_ONLY_ARGS.contains(&arg) {
                return;
            }

            if let Value::String(s) = &value {
                value = Value::String(s.trim().to_string());
            }
            if is_empty_like(&value) {
                value = Value::from("");
            }
        }

        self.write().insert(arg.to_string(), value);
    }

    /// Returns a copy of the full argument bag.
    pub fn get_args(&self) -> Args {
        self.read().clone()
    }

    /// An object is valid once it has a name.
    pub fn is_valid(&self) -> bool {
        self.name().is_some()
    }

    /// The registry key of this object: `object_type[/parent][/name]`.
    pub fn identifier(&self) -> Option<String> {
        identifier_from_args(&self.read())
    }

    fn string_arg(&self, arg: &str) -> Option<String> {
        let value = arg_to_string(self.read().get(arg));
        (!value.is_empty()).then_some(value)
    }

    pub fn object_type(&self) -> Option<String> {
        self.string_arg("object_type")
    }

    pub fn name(&self) -> Option<String> {
        self.string_arg("name")
    }

    pub fn id(&self) -> Option<String> {
        self.string_arg("id")
    }

    pub fn parent(&self) -> Option<String> {
        self.string_arg("parent")
    }

    pub fn group(&self) -> Option<String> {
        self.string_arg("group")
    }

    pub fn label(&self) -> Option<String> {
        self.string_arg("label")
    }

    pub fn description(&self) -> Option<String> {
        self.string_arg("description")
    }

    /// Storage type tag, e.g. `collection` or `file`.
    pub fn storage_type(&self) -> Option<String> {
        self.string_arg("object_storage_type")
    }

    /// Reads one attribute of this object. Empty values read as `None`.
    pub fn attribute(&self, attribute: Attribute) -> Option<String> {
        match attribute {
            Attribute::Identifier => self.identifier(),
            other => self.string_arg(other.as_str()),
        }
    }

    /// Resolves the parent reference through the registry.
    pub fn parent_object(&self) -> Option<ObjectRef> {
        let parent = self.parent()?;
        self.store()?.get_object(&parent)
    }

    /// Resolves the group reference through the registry.
    ///
    /// A resolved group rewrites the stored `group` argument to the group's
    /// canonical identifier.
    pub fn group_object(&self) -> Option<ObjectRef> {
        let group = self.group()?;
        let object = self.store()?.get_object(&group)?;

        if let Some(identifier) = object.identifier() {
            self.set_arg("group", Value::from(identifier));
        }

        Some(object)
    }

    /// Resolves the object behind `relation`.
    pub fn related_object(&self, relation: Relation) -> Option<ObjectRef> {
        match relation {
            Relation::Parent => self.parent_object(),
            Relation::Group => self.group_object(),
        }
    }

    /// Reads `attribute` from the object referenced by `relation`.
    ///
    /// `resolve_delegated_attribute(Relation::Parent, Attribute::Label)` is the
    /// parent's label, or `None` when no parent resolves.
    pub fn resolve_delegated_attribute(
        &self,
        relation: Relation,
        attribute: Attribute,
    ) -> Option<String> {
        self.related_object(relation)?.attribute(attribute)
    }

    /// Objects owned by this one: groups and fields whose `parent` points at
    /// this object's identifier or id.
    pub fn children(&self) -> Vec<ObjectRef> {
        let Some(store) = self.store() else {
            return Vec::new();
        };

        let keys: Vec<String> = [self.identifier(), self.id()]
            .into_iter()
            .flatten()
            .collect();
        if keys.is_empty() {
            return Vec::new();
        }

        store
            .all_objects()
            .into_values()
            .filter(|child| child.kind().is_child_type())
            .filter(|child| child.parent().is_some_and(|p| keys.contains(&p)))
            .collect()
    }

    /// Owned field objects.
    pub fn fields(&self) -> Vec<ObjectRef> {
        self.children_of(ObjectType::Field)
    }

    /// Owned group objects.
    pub fn groups(&self) -> Vec<ObjectRef> {
        self.children_of(ObjectType::Group)
    }

    fn children_of(&self, kind: ObjectType) -> Vec<ObjectRef> {
        self.children()
            .into_iter()
            .filter(|child| child.kind() == kind)
            .collect()
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier().as_deref().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(value: Value) -> Args {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn object_type_is_forced_to_kind() {
        let o = Object::detached(ObjectType::Field, args(json!({"object_type": "pod"})));
        assert_eq!(o.object_type().as_deref(), Some("field"));
    }

    #[test]
    fn read_only_args_are_dropped() {
        let o = Object::detached(
            ObjectType::Pod,
            args(json!({"name": "blog", "fields": ["a"], "options": {"x": 1}})),
        );
        assert_eq!(o.get_arg("fields"), None);
        assert_eq!(o.get_arg("options"), None);
    }

    #[test]
    fn detached_lookups_are_none() {
        let o = Object::detached(ObjectType::Field, args(json!({"parent": "pod/blog"})));
        assert!(o.parent_object().is_none());
        assert!(o.children().is_empty());
    }
}
