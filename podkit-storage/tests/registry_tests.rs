use podkit_model::{Object, ObjectType, Store};
use podkit_storage::{Collection, FindQuery, Storage, StorageConfig, StorageError, StorageRegistry};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

fn pod(store: &Arc<Store>, value: serde_json::Value) -> podkit_model::ObjectRef {
    Object::new(store, ObjectType::Pod, value.as_object().cloned().unwrap())
}

#[test]
fn defaults_register_collection_and_file() {
    let store = Store::new();
    let registry = StorageRegistry::with_defaults(&store, &StorageConfig::default());

    assert_eq!(registry.types(), vec!["collection", "file"]);
    assert_eq!(registry.get("file").unwrap().label(), "File");
    assert_eq!(registry.get("collection").unwrap().label(), "Code");
    assert!(registry.get("table").is_none());
}

#[test]
fn require_names_unknown_types() {
    let registry = StorageRegistry::with_defaults(&Store::new(), &StorageConfig::default());
    let err = match registry.require("table") {
        Err(err) => err,
        Ok(_) => panic!("table storage should not be registered"),
    };
    assert!(matches!(err, StorageError::UnknownStorageType(ref t) if t == "table"));
    assert_eq!(err.to_string(), "unknown storage type: table");
}

#[test]
fn for_object_dispatches_on_storage_type() {
    let store = Store::new();
    let registry = StorageRegistry::with_defaults(&store, &StorageConfig::default());

    let file_pod = pod(&store, json!({"name": "f", "object_storage_type": "file"}));
    let code_pod = pod(&store, json!({"name": "c"}));
    let table_pod = pod(&store, json!({"name": "t", "object_storage_type": "table"}));

    assert_eq!(registry.for_object(&file_pod).unwrap().storage_type(), "file");
    assert_eq!(registry.for_object(&code_pod).unwrap().storage_type(), "collection");
    assert_eq!(registry.for_object(&table_pod).unwrap().storage_type(), "collection");
}

#[test]
fn default_storage_is_configurable() {
    let store = Store::new();
    let config = StorageConfig {
        default_storage: "file".into(),
        ..StorageConfig::default()
    };
    let registry = StorageRegistry::with_defaults(&store, &config);

    let table_pod = pod(&store, json!({"name": "t", "object_storage_type": "table"}));
    assert_eq!(registry.for_object(&table_pod).unwrap().storage_type(), "file");
}

#[test]
fn empty_registry_has_no_fallback() {
    let registry = StorageRegistry::new("collection");
    let object = Object::detached(ObjectType::Pod, json!({"name": "p"}).as_object().cloned().unwrap());
    assert!(registry.for_object(&object).is_none());
    assert!(registry.default_adapter().is_none());
}

#[test]
fn register_replaces_existing_adapter() {
    let store = Store::new();
    let mut registry = StorageRegistry::with_defaults(&store, &StorageConfig::default());

    let custom = Collection::with_type(Arc::clone(&store), StorageConfig::default(), "collection", "Custom", &["collection"]);
    let previous = registry.register(Arc::new(custom));

    assert_eq!(previous.unwrap().label(), "Code");
    assert_eq!(registry.get("collection").unwrap().label(), "Custom");
}

#[test]
fn dispatched_adapter_saves_into_shared_store() {
    let store = Store::new();
    let registry = StorageRegistry::with_defaults(&store, &StorageConfig::default());
    let object = pod(&store, json!({"name": "blog"}));

    let adapter = registry.for_object(&object).unwrap();
    assert!(adapter.save(&object));

    let found = registry
        .require("collection")
        .unwrap()
        .find(&FindQuery::new().object_type("pod"));
    assert!(Arc::ptr_eq(&found["blog"], &object));
}

#[test]
fn debug_lists_registered_types() {
    let registry = StorageRegistry::with_defaults(&Store::new(), &StorageConfig::default());
    assert_eq!(
        format!("{registry:?}"),
        r#"StorageRegistry { types: ["collection", "file"], default_storage: "collection" }"#
    );
}
