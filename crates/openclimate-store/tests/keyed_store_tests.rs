// Integration tests for the keyed entity store
// Covers save/get/get_all/delete semantics, partition declaration and
// persistence across reopen.

use openclimate_core::{ExErrorKind, Partition};
use openclimate_store::{KeyedStore, StoreConfig};
use serde::{Deserialize, Serialize};
use tempfile::TempDir;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Note {
    text: String,
}

fn note(text: &str) -> Note {
    Note {
        text: text.to_string(),
    }
}

#[test]
fn test_save_then_get_returns_json_bytes() {
    let store = KeyedStore::in_memory().unwrap();
    store.save(Partition::Requests, 1, &note("hello")).unwrap();

    let bytes = store.get(Partition::Requests, 1).unwrap();
    let decoded: Note = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(decoded, note("hello"));
}

#[test]
fn test_save_is_idempotent_and_overwrites() {
    let store = KeyedStore::in_memory().unwrap();
    store.save(Partition::Requests, 1, &note("first")).unwrap();
    store.save(Partition::Requests, 1, &note("first")).unwrap();
    assert_eq!(store.count(Partition::Requests).unwrap(), 1);

    store.save(Partition::Requests, 1, &note("second")).unwrap();
    let decoded: Note =
        serde_json::from_slice(&store.get(Partition::Requests, 1).unwrap()).unwrap();
    assert_eq!(decoded.text, "second");
}

#[test]
fn test_get_missing_key_is_not_found() {
    let store = KeyedStore::in_memory().unwrap();
    let err = store.get(Partition::Oversight, 42).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
    assert_eq!(err.partition(), Some(Partition::Oversight));
    assert_eq!(err.index(), Some(42));
}

#[test]
fn test_partitions_are_isolated() {
    let store = KeyedStore::in_memory().unwrap();
    store.save(Partition::Cities, 1, &note("city")).unwrap();

    assert!(store.contains(Partition::Cities, 1).unwrap());
    assert!(!store.contains(Partition::Requests, 1).unwrap());
    assert!(store.get_all(Partition::Requests).unwrap().is_empty());
}

#[test]
fn test_get_all_is_in_key_order_and_restartable() {
    let store = KeyedStore::in_memory().unwrap();
    for key in [3, 1, 2] {
        store
            .save(Partition::Requests, key, &note(&key.to_string()))
            .unwrap();
    }

    let first = store.get_all(Partition::Requests).unwrap();
    let keys: Vec<_> = first.iter().map(|r| r.key).collect();
    assert_eq!(keys, vec![1, 2, 3]);

    let second = store.get_all(Partition::Requests).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_delete_does_not_renumber_siblings() {
    let store = KeyedStore::in_memory().unwrap();
    for key in 1..=3 {
        store.save(Partition::Requests, key, &note("n")).unwrap();
    }

    store.delete(Partition::Requests, 2).unwrap();

    let keys: Vec<_> = store
        .get_all(Partition::Requests)
        .unwrap()
        .iter()
        .map(|r| r.key)
        .collect();
    assert_eq!(keys, vec![1, 3]);
    assert_eq!(
        store.get(Partition::Requests, 2).unwrap_err().kind(),
        ExErrorKind::NotFound
    );
}

#[test]
fn test_delete_absent_key_is_noop() {
    let store = KeyedStore::in_memory().unwrap();
    store.delete(Partition::Requests, 99).unwrap();
}

#[test]
fn test_corrupt_element_aborts_decoded_scan() {
    let store = KeyedStore::in_memory().unwrap();
    store.save(Partition::Requests, 1, &note("ok")).unwrap();
    store
        .save_bytes(Partition::Requests, 2, b"\x00not json")
        .unwrap();
    store.save(Partition::Requests, 3, &note("ok")).unwrap();

    let err = store
        .get_all_decoded::<Note>(Partition::Requests)
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::DataCorruption);
    assert_eq!(err.index(), Some(2));

    // The raw scan still works; only decoding rejects the record
    assert_eq!(store.get_all(Partition::Requests).unwrap().len(), 3);
}

#[test]
fn test_undeclared_partition_is_invalid_input() {
    let config = StoreConfig::in_memory().with_partitions([Partition::Countries]);
    let store = KeyedStore::open(config).unwrap();

    let err = store.save(Partition::Users, 1, &note("x")).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    assert_eq!(
        store.get_all(Partition::Users).unwrap_err().kind(),
        ExErrorKind::InvalidInput
    );
    assert_eq!(store.partitions(), &[Partition::Countries]);
}

#[test]
fn test_reopen_keeps_records_and_adds_missing_partitions() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("openclimate.db");

    {
        let config = StoreConfig::file(&path).with_partitions([Partition::Countries]);
        let store = KeyedStore::open(config).unwrap();
        store.save(Partition::Countries, 1, &note("kept")).unwrap();
    }

    let store = KeyedStore::open(StoreConfig::file(&path)).unwrap();
    let decoded: Note =
        serde_json::from_slice(&store.get(Partition::Countries, 1).unwrap()).unwrap();
    assert_eq!(decoded.text, "kept");

    // Pledges was not declared on first open; it exists now
    store.save(Partition::Pledges, 1, &note("new")).unwrap();
    assert_eq!(store.count(Partition::Pledges).unwrap(), 1);
}

#[test]
fn test_open_twice_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("openclimate.db");

    KeyedStore::open(StoreConfig::file(&path)).unwrap();
    KeyedStore::open(StoreConfig::file(&path)).unwrap();
}

#[test]
fn test_open_in_missing_directory_is_io_family_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("no").join("such").join("dir").join("db");

    let err = KeyedStore::open(StoreConfig::file(path)).unwrap_err();
    assert!(err.kind().is_io());
}

#[test]
fn test_flush_empties_partitions_and_resets_counters() {
    let store = KeyedStore::in_memory().unwrap();
    store
        .insert_next(Partition::Requests, |_| Ok(b"{}".to_vec()))
        .unwrap();
    store
        .insert_next(Partition::Requests, |_| Ok(b"{}".to_vec()))
        .unwrap();

    store.flush().unwrap();

    assert_eq!(store.count(Partition::Requests).unwrap(), 0);
    let index = store
        .insert_next(Partition::Requests, |_| Ok(b"{}".to_vec()))
        .unwrap();
    assert_eq!(index, 1);
}
