use podkit_model::{ObjectType, Store};
use podkit_storage::{Collection, FileStorage, FindQuery, Storage, StorageConfig, StorageError};
use pretty_assertions::assert_eq;
use std::io::Write;
use std::sync::Arc;

const SCHEMA: &str = r#"{
  "pods": [
    {
      "name": "book",
      "label": "Books",
      "groups": [
        { "name": "details", "fields": [ { "name": "isbn", "type": "text" } ] }
      ],
      "fields": [ { "name": "title", "type": "text" } ]
    },
    { "name": "author" }
  ],
  "templates": [ { "name": "book-list" } ],
  "pages": [ { "name": "library" } ]
}"#;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn setup() -> (Arc<Store>, FileStorage) {
    init_tracing();
    let store = Store::new();
    let storage = FileStorage::new(Arc::clone(&store), StorageConfig::default());
    (store, storage)
}

// ── Loading ──────────────────────────────────────────────────────

#[test]
fn load_str_registers_every_declared_object() {
    let (store, storage) = setup();
    assert_eq!(storage.load_str(SCHEMA).unwrap(), 7);
    assert_eq!(store.len(), 7);

    let keys: Vec<String> = store.all_objects().keys().cloned().collect();
    assert_eq!(
        keys,
        vec![
            "pod/book",
            "group/pod/book/details",
            "field/pod/book/isbn",
            "field/pod/book/title",
            "pod/author",
            "template/book-list",
            "page/library",
        ]
    );
}

#[test]
fn loaded_objects_are_tagged_file() {
    let (store, storage) = setup();
    storage.load_str(SCHEMA).unwrap();

    for object in store.all_objects().values() {
        assert_eq!(object.storage_type().as_deref(), Some("file"));
    }
}

#[test]
fn group_fields_reference_pod_and_group() {
    let (store, storage) = setup();
    storage.load_str(SCHEMA).unwrap();

    let isbn = store.get_object("field/pod/book/isbn").unwrap();
    assert_eq!(isbn.parent().as_deref(), Some("pod/book"));
    assert_eq!(isbn.group().as_deref(), Some("group/pod/book/details"));
    assert_eq!(isbn.get_arg("type"), Some(serde_json::json!("text")));

    let title = store.get_object("field/pod/book/title").unwrap();
    assert_eq!(title.group(), None);
    assert_eq!(title.kind(), ObjectType::Field);
}

#[test]
fn empty_document_loads_nothing() {
    let (store, storage) = setup();
    assert_eq!(storage.load_str("{}").unwrap(), 0);
    assert!(store.is_empty());
}

#[test]
fn load_path_reads_from_disk() {
    let (store, storage) = setup();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SCHEMA.as_bytes()).unwrap();

    assert_eq!(storage.load_path(file.path()).unwrap(), 7);
    assert!(store.get_object("pod/book").is_some());
}

// ── Errors ───────────────────────────────────────────────────────

#[test]
fn malformed_json_is_a_serialization_error() {
    let (store, storage) = setup();
    let err = storage.load_str("{ not json").unwrap_err();
    assert!(matches!(err, StorageError::Serialization(_)));
    assert!(store.is_empty());
}

#[test]
fn nameless_object_rejects_whole_document() {
    let (store, storage) = setup();
    let schema = r#"{ "pods": [ { "name": "ok", "fields": [ { "label": "No name" } ] } ] }"#;

    let err = storage.load_str(schema).unwrap_err();
    assert!(matches!(err, StorageError::InvalidSchema(_)));
    assert!(store.is_empty());
}

#[test]
fn missing_file_is_an_io_error() {
    let (_store, storage) = setup();
    let dir = tempfile::tempdir().unwrap();
    let err = storage.load_path(&dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, StorageError::Io(_)));
}

// ── Queries ──────────────────────────────────────────────────────

#[test]
fn find_fields_of_a_loaded_pod() {
    let (_store, storage) = setup();
    storage.load_str(SCHEMA).unwrap();

    let found = storage.find(&FindQuery::new().object_type("field").parent("pod/book"));
    let names: Vec<&str> = found.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["isbn", "title"]);
}

#[test]
fn file_storage_ignores_collection_objects() {
    let (store, storage) = setup();
    let collection = Collection::new(Arc::clone(&store), StorageConfig::default());
    storage.load_str(SCHEMA).unwrap();

    let code_pod = podkit_model::Object::new(
        &store,
        ObjectType::Pod,
        serde_json::json!({"name": "code"}).as_object().cloned().unwrap(),
    );
    collection.save(&code_pod);

    let from_file = storage.find(&FindQuery::new().object_type("pod"));
    let names: Vec<&str> = from_file.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["book", "author"]);

    // The collection adapter sees file objects too.
    let from_collection = collection.find(&FindQuery::new().object_type("pod"));
    assert_eq!(from_collection.len(), 3);
}

#[test]
fn get_loaded_pod() {
    let (_store, storage) = setup();
    storage.load_str(SCHEMA).unwrap();

    let pod = storage.get(&FindQuery::new().object_type("pod").name("book")).unwrap();
    assert_eq!(pod.label().as_deref(), Some("Books"));
    assert_eq!(pod.fields().len(), 2);
    assert_eq!(pod.groups().len(), 1);
}

#[test]
fn delete_loaded_pod_cascades() {
    let (store, storage) = setup();
    storage.load_str(SCHEMA).unwrap();

    let pod = store.get_object("pod/book").unwrap();
    assert!(storage.delete(&pod));

    let keys: Vec<String> = store.all_objects().keys().cloned().collect();
    assert_eq!(keys, vec!["pod/author", "template/book-list", "page/library"]);
}

#[test]
fn adapter_identity() {
    let (_store, storage) = setup();
    assert_eq!(storage.storage_type(), "file");
    assert_eq!(storage.label(), "File");
    assert_eq!(storage.collection().storage_type(), "file");
}
