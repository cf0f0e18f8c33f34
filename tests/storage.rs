mod common;

use civic_records::entities::{Priority, Report, ReportStatus};
use civic_records::storage::envelope;
use civic_records::storage::{FileStorage, KeyValueStore, MemoryStorage};
use civic_records::utils::merge::{patch_from, shallow_merge};
use civic_records::StoreError;
use common::report;
use serde_json::json;

#[test]
fn test_memory_storage_set_get_remove() {
    let storage = MemoryStorage::new();
    assert!(storage.get("k").unwrap().is_none());

    storage.set("k", "v1").unwrap();
    storage.set("k", "v2").unwrap();
    assert_eq!(storage.get("k").unwrap().as_deref(), Some("v2"));

    storage.remove("k").unwrap();
    storage.remove("k").unwrap();
    assert!(storage.get("k").unwrap().is_none());
}

#[test]
fn test_memory_quota_counts_replaced_value_once() {
    let storage = MemoryStorage::with_quota(10);
    storage.set("key", "1234567").unwrap();
    assert_eq!(storage.used_bytes(), 10);

    // Replacing the value frees the old bytes first
    storage.set("key", "abcdefg").unwrap();

    let result = storage.set("other", "x");
    assert!(matches!(result, Err(StoreError::StorageFailure(msg)) if msg.contains("quota")));
    assert_eq!(storage.get("key").unwrap().as_deref(), Some("abcdefg"));
}

#[test]
fn test_file_storage_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path().join("data")).unwrap();

    assert!(storage.get("local_reports").unwrap().is_none());
    storage.set("local_reports", "{\"reports\":[]}").unwrap();

    assert!(dir.path().join("data").join("local_reports.json").exists());
    assert_eq!(storage.get("local_reports").unwrap().as_deref(), Some("{\"reports\":[]}"));

    storage.remove("local_reports").unwrap();
    storage.remove("local_reports").unwrap();
    assert!(storage.get("local_reports").unwrap().is_none());
}

#[test]
fn test_file_storage_failed_write_leaves_no_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path()).unwrap();
    // A non-empty directory in the target's place makes the final rename fail
    let blocker = dir.path().join("local_users.json");
    std::fs::create_dir(&blocker).unwrap();
    std::fs::write(blocker.join("keep"), "x").unwrap();

    let result = storage.set("local_users", "{\"users\":[]}");

    assert!(matches!(result, Err(StoreError::StorageFailure(_))));
    assert!(!dir.path().join("local_users.tmp").exists());

    storage.set("local_reports", "{}").unwrap();
    assert!(!dir.path().join("local_reports.tmp").exists());
}

#[test]
fn test_file_storage_rejects_path_like_keys() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path()).unwrap();

    for key in ["", "../escape", "a/b", ".hidden"] {
        assert!(
            matches!(storage.set(key, "x"), Err(StoreError::InvalidData(_))),
            "key {:?} should be rejected",
            key
        );
    }
}

#[test]
fn test_envelope_missing_collection_decodes_empty() {
    let decoded = envelope::decode::<Report>("reports", r#"{"lastUpdated":"2025-01-01T00:00:00.000Z","version":"1.0"}"#)
        .unwrap();

    assert!(decoded.items.is_empty());
    assert_eq!(decoded.version.as_deref(), Some("1.0"));
    assert_eq!(decoded.last_updated.as_deref(), Some("2025-01-01T00:00:00.000Z"));
}

#[test]
fn test_envelope_encode_then_decode_keeps_items() {
    let items = vec![report("r1", ReportStatus::InProgress, Priority::Medium, "a@example.com")];

    let raw = envelope::encode("reports", &items).unwrap();
    let decoded = envelope::decode::<Report>("reports", &raw).unwrap();

    assert_eq!(decoded.items, items);
    assert_eq!(decoded.version.as_deref(), Some("1.0"));
    assert!(decoded.last_updated.is_some());
}

#[test]
fn test_envelope_rejects_non_object() {
    let result = envelope::decode::<Report>("reports", "[1, 2, 3]");
    assert!(matches!(result, Err(StoreError::InvalidData(_))));
}

#[test]
fn test_patch_from_requires_object() {
    assert!(patch_from(json!({ "status": "resolved" })).is_ok());
    assert!(matches!(patch_from(json!(["status"])), Err(StoreError::InvalidData(_))));
}

#[test]
fn test_shallow_merge_adds_new_fields() {
    let original = report("r1", ReportStatus::New, Priority::Low, "a@example.com");
    let patch = patch_from(json!({ "hasImages": true, "notes": ["first"] })).unwrap();

    let merged = shallow_merge(&original, &patch, &[]).unwrap();

    assert!(merged.has_images);
    assert_eq!(merged.extra["notes"], json!(["first"]));
    assert_eq!(merged.id, original.id);
}

#[test]
fn test_shallow_merge_writes_alias_under_canonical_name() {
    let mut original = report("r1", ReportStatus::New, Priority::Low, "a@example.com");
    original.created_at = Some("2024-01-01T00:00:00Z".parse().unwrap());
    let patch = patch_from(json!({ "created_at": "2025-03-04T05:06:07Z" })).unwrap();

    let merged = shallow_merge(&original, &patch, &[("created_at", "createdAt")]).unwrap();

    assert_eq!(merged.created_at, Some("2025-03-04T05:06:07Z".parse().unwrap()));
    assert!(!merged.extra.contains_key("created_at"));
}
