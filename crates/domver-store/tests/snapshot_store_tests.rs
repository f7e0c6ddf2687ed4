//! File-backed snapshot store behavior against a real temp directory.

use domver_core::canonical::compute_hash;
use domver_core::model::{DomainManifest, Entity, Property};
use domver_core::snapshot::{create_snapshot, Snapshot};
use domver_store::{SnapshotStore, StoreLayout};
use std::fs;
use tempfile::TempDir;

fn shop(version: &str) -> Snapshot {
    let mut manifest = DomainManifest::new("Shop", version);
    let mut customer = Entity::new("Customer");
    customer.properties.push(Property::new("Id", "int").required());
    customer.key_properties.insert("Id".to_string());
    manifest.entities.push(customer);
    create_snapshot(manifest, None).unwrap()
}

#[test]
fn save_then_load_round_trips_and_rehashes() {
    let dir = TempDir::new().unwrap();
    let store = SnapshotStore::open(dir.path());

    let original = shop("1.0.0");
    let path = store.save(&original).unwrap();
    assert!(path.exists());

    let loaded = store.load("Shop", "1.0.0").unwrap();
    assert_eq!(loaded, original);
    assert_eq!(compute_hash(&loaded.manifest).unwrap(), original.hash);
}

#[test]
fn save_uses_domain_subdirectory_by_default() {
    let dir = TempDir::new().unwrap();
    let store = SnapshotStore::open(dir.path());

    let path = store.save(&shop("1.0.0")).unwrap();
    assert_eq!(
        path,
        dir.path().join("Shop").join("Shop_v1.0.0.snapshot.json")
    );
}

#[test]
fn save_rejects_empty_identity() {
    let dir = TempDir::new().unwrap();
    let store = SnapshotStore::open(dir.path());

    let mut snapshot = shop("1.0.0");
    snapshot.name = String::new();
    let err = store.save(&snapshot).unwrap_err();
    assert_eq!(err.code(), "ERR_INVALID_INPUT");
}

#[test]
fn save_overwrites_existing_version() {
    let dir = TempDir::new().unwrap();
    let store = SnapshotStore::open(dir.path());

    store.save(&shop("1.0.0")).unwrap();
    let mut updated = shop("1.0.0");
    updated
        .manifest
        .metadata
        .insert("owner".to_string(), "platform".to_string());
    store.save(&updated).unwrap();

    let loaded = store.load("Shop", "1.0.0").unwrap();
    assert_eq!(loaded.manifest.metadata.get("owner").map(String::as_str), Some("platform"));
}

#[test]
fn list_versions_sorts_semantically() {
    let dir = TempDir::new().unwrap();
    let store = SnapshotStore::open(dir.path());

    for version in ["1.9.1", "1.10.0", "1.2.0"] {
        store.save(&shop(version)).unwrap();
    }

    assert_eq!(
        store.list_versions("Shop").unwrap(),
        vec!["1.2.0", "1.9.1", "1.10.0"]
    );
}

#[test]
fn list_versions_of_unknown_domain_is_empty() {
    let dir = TempDir::new().unwrap();
    let store = SnapshotStore::open(dir.path());
    assert!(store.list_versions("Nowhere").unwrap().is_empty());
}

#[test]
fn list_versions_ignores_foreign_files() {
    let dir = TempDir::new().unwrap();
    let store = SnapshotStore::open(dir.path());
    store.save(&shop("1.0.0")).unwrap();

    let domain_dir = store.layout().domain_dir("Shop");
    fs::write(domain_dir.join("notes.txt"), "scratch").unwrap();
    fs::write(domain_dir.join("Other_v9.9.9.snapshot.json"), "{}").unwrap();

    assert_eq!(store.list_versions("Shop").unwrap(), vec!["1.0.0"]);
}

#[test]
fn get_latest_returns_highest_version() {
    let dir = TempDir::new().unwrap();
    let store = SnapshotStore::open(dir.path());

    for version in ["1.0.0", "2.0.0-rc.1", "2.0.0", "1.5.0"] {
        store.save(&shop(version)).unwrap();
    }

    let latest = store.get_latest("Shop").unwrap();
    assert_eq!(latest.version, "2.0.0");
}

#[test]
fn get_latest_of_empty_domain_is_not_found() {
    let dir = TempDir::new().unwrap();
    let store = SnapshotStore::open(dir.path());
    let err = store.get_latest("Shop").unwrap_err();
    assert_eq!(err.code(), "ERR_NOT_FOUND");
}

#[test]
fn load_missing_snapshot_is_not_found() {
    let dir = TempDir::new().unwrap();
    let store = SnapshotStore::open(dir.path());
    let err = store.load("Shop", "9.9.9").unwrap_err();
    assert_eq!(err.code(), "ERR_NOT_FOUND");
}

#[test]
fn load_malformed_content_is_a_format_error() {
    let dir = TempDir::new().unwrap();
    let store = SnapshotStore::open(dir.path());

    let path = store.layout().snapshot_path("Shop", "1.0.0");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "not json at all").unwrap();

    let err = store.load("Shop", "1.0.0").unwrap_err();
    assert_eq!(err.code(), "ERR_FORMAT");
}

#[test]
fn exists_and_delete() {
    let dir = TempDir::new().unwrap();
    let store = SnapshotStore::open(dir.path());

    store.save(&shop("1.0.0")).unwrap();
    assert!(store.exists("Shop", "1.0.0"));
    assert!(!store.exists("Shop", "2.0.0"));

    store.delete("Shop", "1.0.0").unwrap();
    assert!(!store.exists("Shop", "1.0.0"));

    let err = store.delete("Shop", "1.0.0").unwrap_err();
    assert_eq!(err.code(), "ERR_NOT_FOUND");
}

#[test]
fn flat_layout_and_custom_pattern() {
    let dir = TempDir::new().unwrap();
    let layout = StoreLayout::new(dir.path())
        .with_domain_subdirs(false)
        .with_file_pattern("{name}-{version}.json")
        .unwrap();
    let store = SnapshotStore::new(layout);

    let path = store.save(&shop("2.1.0")).unwrap();
    assert_eq!(path, dir.path().join("Shop-2.1.0.json"));
    assert_eq!(store.list_versions("Shop").unwrap(), vec!["2.1.0"]);
    assert_eq!(store.get_latest("Shop").unwrap().version, "2.1.0");
}

#[test]
fn no_temp_files_remain_after_save() {
    let dir = TempDir::new().unwrap();
    let store = SnapshotStore::open(dir.path());
    store.save(&shop("1.0.0")).unwrap();

    let domain_dir = store.layout().domain_dir("Shop");
    let leftovers: Vec<_> = fs::read_dir(&domain_dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}
