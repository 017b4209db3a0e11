use podkit_storage::{StorageConfig, StorageError, DEFAULT_FIND_LIMIT};
use pretty_assertions::assert_eq;
use std::io::Write;

#[test]
fn defaults() {
    let config = StorageConfig::default();
    assert_eq!(config.find_limit, DEFAULT_FIND_LIMIT);
    assert_eq!(config.find_limit, 300);
    assert_eq!(config.default_storage, "collection");
    assert!(config.cache_finds);
}

#[test]
fn empty_toml_is_default() {
    assert_eq!(StorageConfig::from_toml_str("").unwrap(), StorageConfig::default());
}

#[test]
fn partial_toml_keeps_other_defaults() {
    let config = StorageConfig::from_toml_str("find_limit = 25").unwrap();
    assert_eq!(
        config,
        StorageConfig {
            find_limit: 25,
            ..StorageConfig::default()
        }
    );
}

#[test]
fn full_toml() {
    let config = StorageConfig::from_toml_str(
        r#"
find_limit = 10
default_storage = "file"
cache_finds = false
"#,
    )
    .unwrap();
    assert_eq!(config.find_limit, 10);
    assert_eq!(config.default_storage, "file");
    assert!(!config.cache_finds);
}

#[test]
fn invalid_toml_is_a_config_error() {
    let err = StorageConfig::from_toml_str("find_limit = \"lots\"").unwrap_err();
    assert!(matches!(err, StorageError::Config(_)));
}

#[test]
fn from_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "cache_finds = false").unwrap();

    let config = StorageConfig::from_path(file.path()).unwrap();
    assert!(!config.cache_finds);
    assert_eq!(config.find_limit, 300);
}
