use civic_records::config::{Config, StorageBackendKind};
use civic_records::storage::KeyValueStore;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.storage.backend, StorageBackendKind::File);
    assert_eq!(config.storage.reports_key, "local_reports");
    assert_eq!(config.storage.users_key, "local_users");
    assert!(config.storage.quota_bytes.is_none());
    assert!(config.remote.enabled);
    assert!(!config.logging.enabled);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_config_validation() {
    let mut config = Config::default();

    // Valid config should pass
    assert!(config.validate().is_ok());

    // Same key for both collections should fail
    config.storage.users_key = "local_reports".to_string();
    assert!(config.validate().is_err());

    // Reset and test empty key
    config.storage.users_key = "  ".to_string();
    assert!(config.validate().is_err());

    // Reset and test zero quota
    config.storage.users_key = "local_users".to_string();
    config.storage.quota_bytes = Some(0);
    assert!(config.validate().is_err());

    // Reset and test unknown log level
    config.storage.quota_bytes = None;
    config.logging.level = "verbose".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_config_serialization() {
    let config = Config::default();
    let toml_str = toml::to_string_pretty(&config).unwrap();
    assert!(toml_str.contains("backend = \"file\""));
    assert!(toml_str.contains("reports_key = \"local_reports\""));
    assert!(toml_str.contains("enabled = true"));
}

#[test]
fn test_partial_config_deserialization() {
    // Test that partial TOML configs merge with defaults
    let partial_toml = r#"
[storage]
backend = "memory"
quota_bytes = 5000000

[remote]
enabled = false
"#;

    let config: Config = toml::from_str(partial_toml).unwrap();

    // Check that specified values are used
    assert_eq!(config.storage.backend, StorageBackendKind::Memory);
    assert_eq!(config.storage.quota_bytes, Some(5_000_000));
    assert!(!config.remote.enabled);

    // Check that unspecified values use defaults
    assert_eq!(config.storage.reports_key, "local_reports");
    assert_eq!(config.storage.users_key, "local_users");
    assert!(!config.logging.enabled);
}

#[test]
fn test_unknown_backend_is_rejected() {
    let result: Result<Config, _> = toml::from_str("[storage]\nbackend = \"indexeddb\"\n");
    assert!(result.is_err());
}

#[test]
fn test_empty_config_deserialization() {
    let config: Config = toml::from_str("").unwrap();
    let default_config = Config::default();

    assert_eq!(config.storage.backend, default_config.storage.backend);
    assert_eq!(config.storage.reports_key, default_config.storage.reports_key);
    assert_eq!(config.remote.enabled, default_config.remote.enabled);
    assert_eq!(config.logging.level, default_config.logging.level);
}

#[test]
fn test_load_from_file_and_open_file_storage() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join("records");
    let config_path = dir.path().join("civic-records.toml");
    std::fs::write(
        &config_path,
        format!("[storage]\ndata_dir = {:?}\nreports_key = \"reports_v2\"\n", data_dir.to_str().unwrap()),
    )
    .unwrap();

    let config = Config::load_from_file(&config_path).unwrap();
    assert_eq!(config.data_dir().unwrap(), data_dir);

    let storage = config.open_storage().unwrap();
    storage.set("reports_v2", "{}").unwrap();
    assert!(data_dir.join("reports_v2.json").exists());
}

#[test]
fn test_load_from_file_rejects_invalid_values() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("civic-records.toml");
    std::fs::write(&config_path, "[logging]\nlevel = \"loud\"\n").unwrap();

    assert!(Config::load_from_file(&config_path).is_err());
}

#[test]
fn test_generate_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    Config::generate_default_config(&path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("# civic-records Configuration File"));
    let reloaded = Config::load_from_file(&path).unwrap();
    assert_eq!(reloaded.storage.users_key, "local_users");
}
