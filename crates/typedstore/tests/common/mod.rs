//! Shared fixtures for typed store integration tests.

#![allow(dead_code)]

use std::fmt::Display;

use typedstore::{
    CursorResult, RawCursor, RawStore, RedbStore, StorageError, StorageResult, StringCodec,
    TypedStore,
};

/// Key used to label every fixture entry.
pub fn key(i: impl Display) -> String {
    format!("key:{i:02}")
}

/// An in-memory raw store pre-filled with raw bytes.
pub fn raw_store(entries: &[(&[u8], &[u8])]) -> RedbStore {
    let store = RedbStore::in_memory().expect("failed to create in-memory store");
    for (k, v) in entries {
        store.put(k, v).expect("failed to put raw entry");
    }
    store
}

/// A raw store whose cursors fail after yielding `fail_after` entries.
pub struct FlakyStore {
    inner: RedbStore,
    fail_after: usize,
}

impl FlakyStore {
    pub fn new(inner: RedbStore, fail_after: usize) -> Self {
        Self { inner, fail_after }
    }
}

pub struct FlakyCursor<C> {
    inner: C,
    remaining: usize,
    failed: bool,
}

impl<C: RawCursor> RawCursor for FlakyCursor<C> {
    fn next(&mut self) -> CursorResult {
        if self.failed {
            return Ok(None);
        }
        if self.remaining == 0 {
            self.failed = true;
            return Err(StorageError::Internal("simulated read failure".into()));
        }
        self.remaining -= 1;
        self.inner.next()
    }
}

impl RawStore for FlakyStore {
    type Cursor<'a> = FlakyCursor<<RedbStore as RawStore>::Cursor<'a>>;

    fn get(&self, key: &[u8]) -> StorageResult<Option<Vec<u8>>> {
        self.inner.get(key)
    }

    fn put(&self, key: &[u8], value: &[u8]) -> StorageResult<()> {
        self.inner.put(key, value)
    }

    fn delete(&self, key: &[u8]) -> StorageResult<bool> {
        self.inner.delete(key)
    }

    fn cursor(&self) -> StorageResult<Self::Cursor<'_>> {
        Ok(FlakyCursor { inner: self.inner.cursor()?, remaining: self.fail_after, failed: false })
    }

    fn close(self) -> StorageResult<()> {
        self.inner.close()
    }
}

/// A typed store over `count` string entries `key:NN -> value:NN` whose
/// cursors fail after `fail_after` entries.
pub fn flaky_store(
    count: usize,
    fail_after: usize,
) -> TypedStore<StringCodec, StringCodec, FlakyStore> {
    let inner = RedbStore::in_memory().expect("failed to create in-memory store");
    let flaky = FlakyStore::new(inner, fail_after);
    let store = TypedStore::with_store(flaky, StringCodec, StringCodec);
    for i in 0..count {
        store.put(&key(i), &format!("value:{i:02}")).expect("failed to put");
    }
    store
}
