//! Open options for raw stores.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default interval between background compactions.
pub const DEFAULT_COMPACTION_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// How writes are made durable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncPolicy {
    /// Every write is committed durably before it returns.
    #[default]
    EveryWrite,
    /// Writes are committed without flushing; a background thread flushes
    /// them at this interval.
    Interval(Duration),
    /// Durability is left to the backend.
    Disabled,
}

impl SyncPolicy {
    /// Build a policy from an interval in milliseconds.
    ///
    /// Negative values sync on every write, zero disables syncing and
    /// positive values sync in the background at that interval.
    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        if millis < 0 {
            Self::EveryWrite
        } else if millis == 0 {
            Self::Disabled
        } else {
            Self::Interval(Duration::from_millis(millis.unsigned_abs()))
        }
    }

    /// The background flush interval, if this policy has one.
    #[must_use]
    pub const fn interval(&self) -> Option<Duration> {
        match self {
            Self::Interval(every) if !every.is_zero() => Some(*every),
            _ => None,
        }
    }
}

/// Options applied when a store is opened.
///
/// The defaults sync on every write and compact once a day.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use typedstore_storage::{StoreOptions, SyncPolicy};
///
/// let options = StoreOptions::new()
///     .background_sync(SyncPolicy::Interval(Duration::from_secs(1)))
///     .background_compaction(None)
///     .cache_size(16 * 1024 * 1024);
///
/// assert_eq!(options.background_compaction_interval, None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreOptions {
    /// How writes are made durable.
    pub background_sync: SyncPolicy,

    /// Interval between background compactions. `None` disables them.
    pub background_compaction_interval: Option<Duration>,

    /// Page cache size in bytes.
    /// If not set, uses the backend's default.
    pub cache_size: Option<usize>,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            background_sync: SyncPolicy::EveryWrite,
            background_compaction_interval: Some(DEFAULT_COMPACTION_INTERVAL),
            cache_size: None,
        }
    }
}

impl StoreOptions {
    /// Create options with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sync policy.
    #[must_use]
    pub const fn background_sync(mut self, policy: SyncPolicy) -> Self {
        self.background_sync = policy;
        self
    }

    /// Set the compaction interval, or `None` to disable compaction.
    #[must_use]
    pub const fn background_compaction(mut self, interval: Option<Duration>) -> Self {
        self.background_compaction_interval = interval;
        self
    }

    /// Set the cache size.
    #[must_use]
    pub const fn cache_size(mut self, size: usize) -> Self {
        self.cache_size = Some(size);
        self
    }

    /// Whether these options need a background maintenance thread.
    #[must_use]
    pub fn needs_maintenance(&self) -> bool {
        self.background_sync.interval().is_some() || self.compaction_interval().is_some()
    }

    pub(crate) fn compaction_interval(&self) -> Option<Duration> {
        self.background_compaction_interval.filter(|every| !every.is_zero())
    }
}
