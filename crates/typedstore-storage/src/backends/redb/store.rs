//! Redb raw store implementation.

use std::path::Path;
use std::sync::{Arc, RwLock, RwLockReadGuard};

use redb::{Database, Durability, ReadTransaction};
use tracing::{debug, warn};

use crate::engine::{RawStore, StorageError, StorageResult};
use crate::options::{StoreOptions, SyncPolicy};

use super::cursor::{RedbCursor, DEFAULT_BATCH_SIZE};
use super::maintenance::Maintenance;
use super::tables::DATA_TABLE;

/// State shared between a store and its maintenance thread.
pub(crate) struct Shared {
    /// Compaction needs exclusive access; everything else takes the read side.
    db: RwLock<Database>,
}

impl Shared {
    fn read(&self) -> StorageResult<RwLockReadGuard<'_, Database>> {
        self.db.read().map_err(|_| StorageError::LockPoisoned)
    }

    /// Commit an empty transaction durably, flushing earlier non-durable commits.
    pub(crate) fn sync(&self) -> StorageResult<()> {
        let db = self.read()?;
        let mut tx = db.begin_write().map_err(|e| StorageError::Internal(e.to_string()))?;
        tx.set_durability(Durability::Immediate);
        tx.commit().map_err(|e| StorageError::Internal(e.to_string()))
    }

    /// Compact the database file. Returns `false` if compaction was skipped.
    pub(crate) fn compact(&self) -> StorageResult<bool> {
        let mut db = self.db.write().map_err(|_| StorageError::LockPoisoned)?;
        match db.compact() {
            Ok(compacted) => Ok(compacted),
            Err(redb::CompactionError::TransactionInProgress) => {
                // Open cursors pin pages; try again next time.
                debug!("compaction skipped: transaction in progress");
                Ok(false)
            }
            Err(e) => Err(StorageError::Compaction(e.to_string())),
        }
    }
}

/// A raw store backed by Redb.
///
/// Every write runs in its own transaction whose durability follows the
/// store's [`SyncPolicy`]. Cursors iterate a snapshot and never block
/// writers.
///
/// # Example
///
/// ```
/// use typedstore_storage::{RawCursor, RawStore, RedbStore};
///
/// let store = RedbStore::in_memory()?;
/// store.put(b"user:1", b"Alice")?;
/// assert_eq!(store.get(b"user:1")?, Some(b"Alice".to_vec()));
///
/// let mut cursor = store.cursor()?;
/// assert_eq!(cursor.next()?, Some((b"user:1".to_vec(), b"Alice".to_vec())));
/// assert_eq!(cursor.next()?, None);
/// # Ok::<(), typedstore_storage::StorageError>(())
/// ```
pub struct RedbStore {
    shared: Arc<Shared>,
    sync_policy: SyncPolicy,
    maintenance: Option<Maintenance>,
}

impl RedbStore {
    /// Open or create a store at the given path with default options.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Open`] if the database cannot be opened or created.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        Self::open_with_options(path, StoreOptions::default())
    }

    /// Open or create a store at the given path.
    ///
    /// Starts a maintenance thread if the options ask for background sync
    /// or compaction.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Open`] if the database cannot be opened or created.
    pub fn open_with_options(
        path: impl AsRef<Path>,
        options: StoreOptions,
    ) -> StorageResult<Self> {
        let path = path.as_ref();
        let mut builder = Database::builder();

        if let Some(cache_size) = options.cache_size {
            builder.set_cache_size(cache_size);
        }

        let db = builder.create(path).map_err(|e| StorageError::Open(e.to_string()))?;
        debug!(path = %path.display(), ?options, "opened redb store");

        Self::from_database(db, options)
    }

    /// Create an in-memory store with default options.
    ///
    /// The data is lost when the store is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Open`] if the database cannot be created.
    pub fn in_memory() -> StorageResult<Self> {
        Self::in_memory_with_options(StoreOptions::default())
    }

    /// Create an in-memory store.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Open`] if the database cannot be created.
    pub fn in_memory_with_options(options: StoreOptions) -> StorageResult<Self> {
        let db = Database::builder()
            .create_with_backend(redb::backends::InMemoryBackend::new())
            .map_err(|e| StorageError::Open(e.to_string()))?;
        debug!(?options, "opened in-memory redb store");

        Self::from_database(db, options)
    }

    fn from_database(db: Database, options: StoreOptions) -> StorageResult<Self> {
        // Create the data table up front so readers always find it.
        let tx = db.begin_write().map_err(|e| StorageError::Open(e.to_string()))?;
        tx.open_table(DATA_TABLE).map_err(|e| StorageError::Open(e.to_string()))?;
        tx.commit().map_err(|e| StorageError::Open(e.to_string()))?;

        let shared = Arc::new(Shared { db: RwLock::new(db) });
        let maintenance = Maintenance::spawn(
            Arc::clone(&shared),
            options.background_sync.interval(),
            options.compaction_interval(),
        )?;

        Ok(Self { shared, sync_policy: options.background_sync, maintenance })
    }

    /// The sync policy this store was opened with.
    #[must_use]
    pub const fn sync_policy(&self) -> SyncPolicy {
        self.sync_policy
    }

    /// Whether a background maintenance thread is running.
    #[must_use]
    pub fn has_maintenance(&self) -> bool {
        self.maintenance.as_ref().is_some_and(Maintenance::is_running)
    }

    pub(crate) fn begin_snapshot(&self) -> StorageResult<ReadTransaction> {
        let db = self.shared.read()?;
        db.begin_read().map_err(|e| StorageError::Internal(e.to_string()))
    }

    const fn durability(&self) -> Durability {
        match self.sync_policy {
            SyncPolicy::EveryWrite => Durability::Immediate,
            SyncPolicy::Interval(_) => Durability::None,
            SyncPolicy::Disabled => Durability::Eventual,
        }
    }

    /// Stop maintenance and flush writes the maintenance thread still owed.
    fn shutdown(&mut self) -> StorageResult<()> {
        let Some(mut maintenance) = self.maintenance.take() else {
            return Ok(());
        };
        maintenance.shutdown();

        if matches!(self.sync_policy, SyncPolicy::Interval(_)) {
            self.shared.sync()?;
        }
        Ok(())
    }
}

impl RawStore for RedbStore {
    type Cursor<'a> = RedbCursor;

    fn get(&self, key: &[u8]) -> StorageResult<Option<Vec<u8>>> {
        let tx = self.begin_snapshot()?;
        match tx.open_table(DATA_TABLE) {
            Ok(table) => {
                let value = table.get(key).map_err(|e| StorageError::Internal(e.to_string()))?;
                Ok(value.map(|v| v.value().to_vec()))
            }
            Err(redb::TableError::TableDoesNotExist(_)) => Ok(None),
            Err(e) => Err(StorageError::Internal(e.to_string())),
        }
    }

    fn put(&self, key: &[u8], value: &[u8]) -> StorageResult<()> {
        let db = self.shared.read()?;
        let mut tx = db.begin_write().map_err(|e| StorageError::Internal(e.to_string()))?;
        tx.set_durability(self.durability());
        {
            let mut table =
                tx.open_table(DATA_TABLE).map_err(|e| StorageError::Internal(e.to_string()))?;
            table.insert(key, value).map_err(|e| StorageError::Internal(e.to_string()))?;
        }
        tx.commit().map_err(|e| StorageError::Internal(e.to_string()))
    }

    fn delete(&self, key: &[u8]) -> StorageResult<bool> {
        let db = self.shared.read()?;
        let mut tx = db.begin_write().map_err(|e| StorageError::Internal(e.to_string()))?;
        tx.set_durability(self.durability());
        let mut table =
            tx.open_table(DATA_TABLE).map_err(|e| StorageError::Internal(e.to_string()))?;
        let removed =
            table.remove(key).map_err(|e| StorageError::Internal(e.to_string()))?.is_some();
        drop(table);
        if removed {
            tx.commit().map_err(|e| StorageError::Internal(e.to_string()))?;
        } else {
            // Ignore abort result - nothing was written
            drop(tx.abort());
        }
        Ok(removed)
    }

    fn cursor(&self) -> StorageResult<RedbCursor> {
        Ok(RedbCursor::new(self.begin_snapshot()?, DEFAULT_BATCH_SIZE))
    }

    fn sync(&self) -> StorageResult<()> {
        self.shared.sync()
    }

    fn compact(&self) -> StorageResult<bool> {
        self.shared.compact()
    }

    fn close(mut self) -> StorageResult<()> {
        let result = self.shutdown();
        debug!("closed redb store");
        result
    }
}

impl Drop for RedbStore {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            warn!(error = %e, "failed to flush redb store on drop");
        }
    }
}
