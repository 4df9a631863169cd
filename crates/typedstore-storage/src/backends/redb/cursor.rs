//! Batched snapshot cursor for the redb backend.
//!
//! The cursor owns a read transaction, so it iterates a consistent snapshot
//! without holding any lock on the store. Entries are loaded in batches
//! (default 1000), each batch resuming strictly after the last key of the
//! previous one, so memory stays bounded regardless of store size.

use std::collections::VecDeque;
use std::ops::Bound;

use redb::ReadTransaction;

use crate::engine::{CursorResult, KeyValue, RawCursor, StorageError, StorageResult};

use super::tables::DATA_TABLE;

/// Default batch size for cursor operations.
pub(crate) const DEFAULT_BATCH_SIZE: usize = 1000;

/// A forward cursor over a redb snapshot.
pub struct RedbCursor {
    /// The snapshot being iterated.
    tx: ReadTransaction,
    /// Entries fetched but not yet returned.
    batch: VecDeque<KeyValue>,
    /// Last key fetched from the table; the next batch starts after it.
    last_key: Option<Vec<u8>>,
    /// Maximum entries per batch.
    batch_size: usize,
    /// No entries remain in the table past `last_key`.
    exhausted: bool,
    /// A fetch failed; the cursor is finished.
    failed: bool,
}

impl RedbCursor {
    pub(crate) fn new(tx: ReadTransaction, batch_size: usize) -> Self {
        Self {
            tx,
            batch: VecDeque::new(),
            last_key: None,
            batch_size: batch_size.max(1),
            exhausted: false,
            failed: false,
        }
    }

    /// Fetch the next batch of entries after `last_key`.
    fn fetch_batch(&mut self) -> StorageResult<()> {
        let table = match self.tx.open_table(DATA_TABLE) {
            Ok(table) => table,
            Err(redb::TableError::TableDoesNotExist(_)) => {
                // No data table means no data, which is not an error
                self.exhausted = true;
                return Ok(());
            }
            Err(e) => return Err(StorageError::Internal(e.to_string())),
        };

        let lower = match &self.last_key {
            Some(key) => Bound::Excluded(key.as_slice()),
            None => Bound::Unbounded,
        };
        let range = table
            .range::<&[u8]>((lower, Bound::Unbounded))
            .map_err(|e| StorageError::Internal(e.to_string()))?;

        let mut fetched = 0;
        for result in range {
            let (k, v) = result.map_err(|e| StorageError::Internal(e.to_string()))?;
            self.batch.push_back((k.value().to_vec(), v.value().to_vec()));
            fetched += 1;
            if fetched >= self.batch_size {
                break;
            }
        }

        if fetched < self.batch_size {
            self.exhausted = true;
        }
        if let Some((key, _)) = self.batch.back() {
            self.last_key = Some(key.clone());
        }
        Ok(())
    }
}

impl RawCursor for RedbCursor {
    fn next(&mut self) -> CursorResult {
        if self.failed {
            return Ok(None);
        }
        if self.batch.is_empty() && !self.exhausted {
            if let Err(e) = self.fetch_batch() {
                self.failed = true;
                self.batch.clear();
                return Err(e);
            }
        }
        Ok(self.batch.pop_front())
    }
}
