//! Integration tests for typed CRUD operations.

#![allow(clippy::float_cmp)]

mod common;

use std::collections::BTreeMap;
use std::thread;

use serde::{Deserialize, Serialize};
use typedstore::{
    fallback_codec, open_default, BincodeCodec, Float64Codec, Int64Codec, IntCodec, Stage,
    StoreOptions, StringCodec, SyncPolicy, TypedStore, Uint32Codec,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct Address {
    street: String,
    city: String,
    zip: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct Person {
    name: String,
    age: i32,
    address: Address,
    tags: Vec<String>,
}

fallback_codec!(Person);

fn alice() -> Person {
    Person {
        name: "Alice".into(),
        age: 30,
        address: Address { street: "1 Main St".into(), city: "Springfield".into(), zip: 12345 },
        tags: vec!["admin".into(), "rust".into()],
    }
}

#[test]
fn test_crud_scenario() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let store = TypedStore::open(dir.path().join("crud.redb"), StringCodec, IntCodec)
        .expect("failed to open store");
    let age = "age".to_string();

    store.put(&age, &42).expect("failed to put");
    assert_eq!(store.get(&age).expect("failed to get"), 42);
    assert!(store.has(&age).expect("failed to check"));

    store.delete(&age).expect("failed to delete");
    assert!(!store.has(&age).expect("failed to check"));
    assert_eq!(store.get(&age).expect("failed to get"), 0);

    store.close().expect("failed to close");
}

#[test]
fn test_update_overwrites() {
    let store = TypedStore::in_memory(StringCodec, StringCodec).expect("failed to open store");
    let k = "k".to_string();

    store.put(&k, &"v1".into()).expect("failed to put");
    store.put(&k, &"v2".into()).expect("failed to put");
    assert_eq!(store.get(&k).expect("failed to get"), "v2");
}

#[test]
fn test_delete_absent_key() {
    let store = TypedStore::in_memory(StringCodec, Int64Codec).expect("failed to open store");
    store.delete(&"nothing".into()).expect("deleting an absent key is not an error");
    assert_eq!(store.try_get(&"nothing".into()).expect("failed to get"), None);
}

#[test]
fn test_reopen_persists_data() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("persist.redb");

    {
        let store = TypedStore::open(&path, Uint32Codec, Float64Codec).expect("failed to open");
        for i in 0u32..10 {
            store.put(&i, &(f64::from(i) * 1.5)).expect("failed to put");
        }
        store.close().expect("failed to close");
    }

    let store = TypedStore::open(&path, Uint32Codec, Float64Codec).expect("failed to reopen");
    assert_eq!(store.get(&4).expect("failed to get"), 6.0);
    assert_eq!(store.items().expect("failed to iterate").count(), 10);
}

#[test]
fn test_reopen_with_interval_sync() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("interval.redb");
    let options = StoreOptions::new()
        .background_sync(SyncPolicy::from_millis(60_000))
        .background_compaction(None);

    {
        let store = TypedStore::open_with_options(&path, StringCodec, StringCodec, options)
            .expect("failed to open");
        store.put(&"pending".into(), &"flushed on close".into()).expect("failed to put");
        store.close().expect("failed to close");
    }

    let store = TypedStore::open(&path, StringCodec, StringCodec).expect("failed to reopen");
    assert_eq!(store.get(&"pending".into()).expect("failed to get"), "flushed on close");
}

#[test]
fn test_fallback_codec_for_structs() {
    let store =
        TypedStore::in_memory(StringCodec, BincodeCodec::<Person>::new()).expect("failed to open");

    store.put(&"alice".into(), &alice()).expect("failed to put");
    assert_eq!(store.get(&"alice".into()).expect("failed to get"), alice());
    assert_eq!(store.get(&"bob".into()).expect("failed to get"), Person::default());
}

#[test]
fn test_fallback_codec_for_collections() {
    let codec = BincodeCodec::<BTreeMap<String, Vec<i64>>>::new();
    let store = TypedStore::in_memory(StringCodec, codec).expect("failed to open");
    let value = BTreeMap::from([
        ("primes".to_string(), vec![2, 3, 5, 7]),
        ("empty".to_string(), Vec::new()),
    ]);

    store.put(&"sets".into(), &value).expect("failed to put");
    assert_eq!(store.get(&"sets".into()).expect("failed to get"), value);
}

#[test]
fn test_open_default_resolves_codecs() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let store =
        open_default::<String, Person>(dir.path().join("people.redb")).expect("failed to open");

    store.put(&"alice".into(), &alice()).expect("failed to put");
    assert_eq!(store.get(&"alice".into()).expect("failed to get"), alice());
    store.close().expect("failed to close");

    let numbers =
        open_default::<u64, i16>(dir.path().join("numbers.redb")).expect("failed to open");
    numbers.put(&7, &-7).expect("failed to put");
    assert_eq!(numbers.get(&7).expect("failed to get"), -7);
}

#[test]
fn test_decode_error_on_get() {
    let raw = common::raw_store(&[(&b"age"[..], &b"not eight"[..])]);
    let store = TypedStore::with_store(raw, StringCodec, Int64Codec);

    let err = store.get(&"age".into()).unwrap_err();
    assert!(err.is_decode());
    assert_eq!(err.stage(), Some(Stage::Value));
}

#[test]
fn test_concurrent_reads() {
    let store = TypedStore::in_memory(Uint32Codec, StringCodec).expect("failed to open store");
    for i in 0u32..100 {
        store.put(&i, &format!("value:{i}")).expect("failed to put");
    }

    thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for i in 0u32..100 {
                    assert_eq!(store.get(&i).expect("failed to get"), format!("value:{i}"));
                }
                assert_eq!(store.items().expect("failed to iterate").count(), 100);
            });
        }
    });
}

#[test]
fn test_read_your_writes_across_threads() {
    let store = TypedStore::in_memory(Uint32Codec, Uint32Codec).expect("failed to open store");

    thread::scope(|scope| {
        for t in 0u32..4 {
            let store = &store;
            scope.spawn(move || {
                for i in 0u32..50 {
                    let key = t * 1000 + i;
                    store.put(&key, &i).expect("failed to put");
                    assert_eq!(store.get(&key).expect("failed to get"), i);
                }
            });
        }
    });

    assert_eq!(store.items().expect("failed to iterate").count(), 200);
}
