//! File storage: schema declared in a JSON document.
//!
//! A schema document lists pods (with their groups and fields), templates and
//! pages:
//!
//! ```json
//! {
//!   "pods": [
//!     {
//!       "name": "book",
//!       "label": "Books",
//!       "groups": [
//!         { "name": "details", "fields": [ { "name": "isbn" } ] }
//!       ],
//!       "fields": [ { "name": "title" } ]
//!     }
//!   ],
//!   "templates": [ { "name": "book-list" } ]
//! }
//! ```
//!
//! Loaded objects are tagged with the `file` storage type and registered in
//! the store; finds and deletes then work exactly as for [`Collection`].

use crate::collection::Collection;
use crate::config::StorageConfig;
use crate::error::{StorageError, StorageResult};
use crate::query::{FindQuery, FindResult};
use crate::storage::Storage;
use podkit_model::{Object, ObjectRef, Store};
use podkit_types::{Args, ObjectType};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Storage types a file adapter can see in the registry.
pub const FILE_COMPATIBLE_TYPES: &[&str] = &["file"];

#[derive(Debug, Deserialize)]
struct SchemaDocument {
    #[serde(default)]
    pods: Vec<PodDecl>,
    #[serde(default)]
    templates: Vec<ObjectDecl>,
    #[serde(default)]
    pages: Vec<ObjectDecl>,
}

#[derive(Debug, Deserialize)]
struct PodDecl {
    #[serde(default)]
    groups: Vec<GroupDecl>,
    #[serde(default)]
    fields: Vec<ObjectDecl>,
    #[serde(flatten)]
    args: Args,
}

#[derive(Debug, Deserialize)]
struct GroupDecl {
    #[serde(default)]
    fields: Vec<ObjectDecl>,
    #[serde(flatten)]
    args: Args,
}

#[derive(Debug, Deserialize)]
struct ObjectDecl {
    #[serde(flatten)]
    args: Args,
}

/// Storage adapter for objects declared in schema documents.
#[derive(Debug)]
pub struct FileStorage {
    inner: Collection,
}

impl FileStorage {
    pub fn new(store: Arc<Store>, config: StorageConfig) -> Self {
        Self {
            inner: Collection::with_type(store, config, "file", "File", FILE_COMPATIBLE_TYPES),
        }
    }

    /// The registry-backed engine this adapter runs on.
    pub fn collection(&self) -> &Collection {
        &self.inner
    }

    /// Loads a schema document from disk. Returns the number of objects
    /// registered.
    pub fn load_path(&self, path: &Path) -> StorageResult<usize> {
        let content = std::fs::read_to_string(path)?;
        let count = self.load_str(&content)?;
        info!(path = %path.display(), objects = count, "Schema file loaded");
        Ok(count)
    }

    /// Loads a schema document from a JSON string. Returns the number of
    /// objects registered.
    ///
    /// The document is validated in full before anything is registered.
    pub fn load_str(&self, json: &str) -> StorageResult<usize> {
        let document: SchemaDocument = serde_json::from_str(json)?;
        let objects = self.build(document)?;

        for object in &objects {
            self.register(object);
        }
        Ok(objects.len())
    }

    fn build(&self, document: SchemaDocument) -> StorageResult<Vec<ObjectRef>> {
        let mut objects = Vec::new();

        for pod in document.pods {
            let pod_object = self.declare(ObjectType::Pod, pod.args, &[])?;
            let pod_identifier = pod_object.identifier().unwrap_or_default();
            objects.push(pod_object);

            for group in pod.groups {
                let group_object =
                    self.declare(ObjectType::Group, group.args, &[("parent", &pod_identifier)])?;
                let group_identifier = group_object.identifier().unwrap_or_default();
                objects.push(group_object);

                for field in group.fields {
                    objects.push(self.declare(
                        ObjectType::Field,
                        field.args,
                        &[("parent", &pod_identifier), ("group", &group_identifier)],
                    )?);
                }
            }

            for field in pod.fields {
                objects.push(self.declare(
                    ObjectType::Field,
                    field.args,
                    &[("parent", &pod_identifier)],
                )?);
            }
        }

        for template in document.templates {
            objects.push(self.declare(ObjectType::Template, template.args, &[])?);
        }
        for page in document.pages {
            objects.push(self.declare(ObjectType::Page, page.args, &[])?);
        }

        Ok(objects)
    }

    fn declare(
        &self,
        kind: ObjectType,
        mut args: Args,
        references: &[(&str, &str)],
    ) -> StorageResult<ObjectRef> {
        for (arg, value) in references {
            args.insert((*arg).to_string(), Value::from(*value));
        }
        args.insert("object_storage_type".into(), Value::from(self.storage_type()));

        let object = Object::new(self.inner.store(), kind, args);
        if !object.is_valid() {
            return Err(StorageError::InvalidSchema(format!(
                "{kind} declared without a name"
            )));
        }
        Ok(object)
    }

    fn register(&self, object: &ObjectRef) {
        self.inner.save(object);
    }
}

impl Storage for FileStorage {
    fn storage_type(&self) -> &'static str {
        self.inner.storage_type()
    }

    fn label(&self) -> &str {
        self.inner.label()
    }

    fn get(&self, query: &FindQuery) -> Option<ObjectRef> {
        self.inner.get(query)
    }

    fn find(&self, query: &FindQuery) -> FindResult {
        self.inner.find(query)
    }

    fn save_object(&self, object: &ObjectRef) -> bool {
        self.inner.save_object(object)
    }

    fn save_args(&self, object: &ObjectRef) -> bool {
        self.inner.save_args(object)
    }

    fn delete_object(&self, object: &ObjectRef) -> bool {
        self.inner.delete_object(object)
    }
}
