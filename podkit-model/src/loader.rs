//! Deserialization constructors.
//!
//! Each constructor accepts a different external representation and either
//! builds a new object or, when the record's id is already owned by the
//! registry, hands back the registered instance. Callers that only need the
//! data can ask for the raw argument bag with [`LoadAs::Args`].

use crate::object::{Object, ObjectRef, PersistedObject};
use crate::store::Store;
use podkit_types::{arg_to_string, Args, ObjectType};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// What a deserialization constructor should hand back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadAs {
    /// A live object.
    #[default]
    Object,
    /// Only the argument bag.
    Args,
}

/// Result of a deserialization constructor.
#[derive(Debug, Clone)]
pub enum Loaded {
    Object(ObjectRef),
    Args(Args),
}

impl Loaded {
    fn finish(object: ObjectRef, load_as: LoadAs) -> Self {
        match load_as {
            LoadAs::Object => Self::Object(object),
            LoadAs::Args => Self::Args(object.get_args()),
        }
    }

    /// The live object, if one was requested.
    pub fn into_object(self) -> Option<ObjectRef> {
        match self {
            Self::Object(object) => Some(object),
            Self::Args(_) => None,
        }
    }

    /// The argument bag, whichever form was loaded.
    pub fn into_args(self) -> Args {
        match self {
            Self::Object(object) => object.get_args(),
            Self::Args(args) => args,
        }
    }
}

/// A record held by an external content store (a CMS post, for example).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalRecord {
    pub id: u64,
    /// Machine name.
    pub slug: String,
    pub title: String,
    pub content: String,
    /// `0` when the record has no parent.
    pub parent_id: u64,
    /// Group reference kept in the record's metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl ExternalRecord {
    fn to_args(&self) -> Args {
        let mut args = Args::new();
        args.insert("name".into(), Value::from(self.slug.as_str()));
        args.insert("id".into(), Value::from(self.id));
        args.insert("label".into(), Value::from(self.title.as_str()));
        args.insert("description".into(), Value::from(self.content.as_str()));
        args.insert("parent".into(), Value::from(""));
        args.insert("group".into(), Value::from(""));

        if self.parent_id > 0 {
            args.insert("parent".into(), Value::from(self.parent_id));
        }
        if let Some(group) = self.group.as_deref().filter(|g| !g.is_empty()) {
            args.insert("group".into(), Value::from(group));
        }
        args
    }
}

/// Collaborator that fetches external records by id.
pub trait RecordSource: Send + Sync {
    fn fetch(&self, id: u64) -> Option<ExternalRecord>;
}

impl RecordSource for HashMap<u64, ExternalRecord> {
    fn fetch(&self, id: u64) -> Option<ExternalRecord> {
        self.get(&id).cloned()
    }
}

fn registered_by_id(store: &Store, args: &Args) -> Option<ObjectRef> {
    let id = arg_to_string(args.get("id"));
    if id.is_empty() || id == "0" {
        return None;
    }
    let object = store.get_object_by_id(&id)?;
    debug!(id = %id, "Reusing registered object");
    Some(object)
}

impl Object {
    /// Loads an object from its serialized form.
    ///
    /// Accepts the persisted envelope (`{"args": {...}}`), which is rebuilt
    /// through setup, or a plain argument object. Anything else is `None`.
    pub fn from_serialized(
        store: &Arc<Store>,
        kind: ObjectType,
        serialized: &str,
        load_as: LoadAs,
    ) -> Option<Loaded> {
        let value: Value = serde_json::from_str(serialized).ok()?;
        let Value::Object(map) = value else {
            return None;
        };

        let object = if map.len() == 1 && map.get("args").is_some_and(Value::is_object) {
            let form: PersistedObject = serde_json::from_value(Value::Object(map)).ok()?;
            Self::from_persisted_form(store, kind, form)
        } else {
            Self::new(store, kind, map)
        };

        Some(Loaded::finish(object, load_as))
    }

    /// Loads an object from a JSON argument object.
    ///
    /// Invalid JSON or a non-object payload is `None`.
    pub fn from_json(
        store: &Arc<Store>,
        kind: ObjectType,
        json: &str,
        load_as: LoadAs,
    ) -> Option<Loaded> {
        match serde_json::from_str(json).ok()? {
            Value::Object(args) => Some(Self::from_array(store, kind, args, load_as)),
            _ => None,
        }
    }

    /// Loads an object from an argument bag.
    pub fn from_array(store: &Arc<Store>, kind: ObjectType, args: Args, load_as: LoadAs) -> Loaded {
        if let Some(object) = registered_by_id(store, &args) {
            return Loaded::finish(object, load_as);
        }
        Loaded::finish(Self::new(store, kind, args), load_as)
    }

    /// Loads an object from an external record.
    pub fn from_external_record(
        store: &Arc<Store>,
        kind: ObjectType,
        record: &ExternalRecord,
        load_as: LoadAs,
    ) -> Loaded {
        if let Some(object) = store.get_object_by_id(&record.id.to_string()) {
            debug!(id = record.id, "Reusing registered object for record");
            return Loaded::finish(object, load_as);
        }
        Loaded::finish(Self::new(store, kind, record.to_args()), load_as)
    }

    /// Fetches a record through `source` and loads it. A missing record is
    /// `None`.
    pub fn from_record_source(
        store: &Arc<Store>,
        kind: ObjectType,
        id: u64,
        source: &dyn RecordSource,
        load_as: LoadAs,
    ) -> Option<Loaded> {
        let record = source.fetch(id)?;
        Some(Self::from_external_record(store, kind, &record, load_as))
    }
}
