//! Core raw store traits.

use super::StorageError;

/// An owned key-value pair.
pub type KeyValue = (Vec<u8>, Vec<u8>);

/// Result of advancing a cursor: `Ok(None)` is the end of the data.
pub type CursorResult = Result<Option<KeyValue>, StorageError>;

/// A byte-keyed store with point operations and a forward cursor.
///
/// Absence of a key is never an error: [`get`](RawStore::get) returns
/// `None` and [`delete`](RawStore::delete) returns `false`.
pub trait RawStore: Send + Sync {
    /// The cursor type for iteration.
    type Cursor<'a>: RawCursor
    where
        Self: 'a;

    /// Get the value stored under a key.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StorageError>;

    /// Store a value under a key, replacing any previous value.
    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), StorageError>;

    /// Remove a key. Returns whether the key was present.
    fn delete(&self, key: &[u8]) -> Result<bool, StorageError>;

    /// Check whether a key is present.
    fn has(&self, key: &[u8]) -> Result<bool, StorageError> {
        Ok(self.get(key)?.is_some())
    }

    /// Open a cursor over every entry, positioned before the first one.
    fn cursor(&self) -> Result<Self::Cursor<'_>, StorageError>;

    /// Flush buffered writes to durable storage.
    fn sync(&self) -> Result<(), StorageError> {
        Ok(())
    }

    /// Reclaim unused space. Returns whether any work was done.
    fn compact(&self) -> Result<bool, StorageError> {
        Ok(false)
    }

    /// Release the store, flushing anything still pending.
    fn close(self) -> Result<(), StorageError>
    where
        Self: Sized;
}

/// A one-shot forward cursor over key-value pairs.
pub trait RawCursor {
    /// Move to the next key-value pair.
    ///
    /// Returns `Ok(None)` once the data is exhausted. After an error the
    /// cursor is finished and keeps returning `Ok(None)`.
    fn next(&mut self) -> CursorResult;
}

impl<C: RawCursor + ?Sized> RawCursor for Box<C> {
    fn next(&mut self) -> CursorResult {
        (**self).next()
    }
}
