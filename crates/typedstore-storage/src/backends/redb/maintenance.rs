//! Background sync and compaction for the redb backend.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::engine::{StorageError, StorageResult};

use super::store::Shared;

/// Handle to the maintenance thread of one store.
///
/// Dropping the handle stops the thread and waits for it to exit.
pub(crate) struct Maintenance {
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

/// A recurring task and when it next runs.
///
/// `next` is `None` when the interval reaches past the end of the clock; such
/// a task is never due.
struct Schedule {
    every: Duration,
    next: Option<Instant>,
}

impl Schedule {
    fn new(every: Duration, now: Instant) -> Self {
        Self { every, next: now.checked_add(every) }
    }

    fn is_due(&self, now: Instant) -> bool {
        self.next.is_some_and(|next| now >= next)
    }

    fn advance(&mut self, now: Instant) {
        self.next = now.checked_add(self.every);
    }
}

impl Maintenance {
    /// Spawn the maintenance thread.
    ///
    /// Returns `None` if neither interval is set.
    pub(crate) fn spawn(
        shared: Arc<Shared>,
        sync_every: Option<Duration>,
        compact_every: Option<Duration>,
    ) -> StorageResult<Option<Self>> {
        if sync_every.is_none() && compact_every.is_none() {
            return Ok(None);
        }

        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let handle = thread::Builder::new()
            .name("typedstore-maintenance".into())
            .spawn(move || {
                let now = Instant::now();
                let mut sync = sync_every.map(|every| Schedule::new(every, now));
                let mut compact = compact_every.map(|every| Schedule::new(every, now));
                debug!(?sync_every, ?compact_every, "maintenance thread started");

                loop {
                    let deadline =
                        [&sync, &compact].into_iter().flatten().filter_map(|s| s.next).min();

                    let Some(deadline) = deadline else {
                        // Nothing will ever fall due; wait for the stop signal.
                        let _ = stop_rx.recv();
                        break;
                    };

                    let timeout = deadline.saturating_duration_since(Instant::now());
                    match stop_rx.recv_timeout(timeout) {
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                        Err(RecvTimeoutError::Timeout) => {}
                    }

                    let now = Instant::now();
                    if let Some(schedule) = sync.as_mut().filter(|s| s.is_due(now)) {
                        match shared.sync() {
                            Ok(()) => debug!("background sync complete"),
                            Err(e) => warn!(error = %e, "background sync failed"),
                        }
                        schedule.advance(now);
                    }
                    if let Some(schedule) = compact.as_mut().filter(|s| s.is_due(now)) {
                        match shared.compact() {
                            Ok(true) => info!("background compaction complete"),
                            Ok(false) => debug!("background compaction skipped"),
                            Err(e) => warn!(error = %e, "background compaction failed"),
                        }
                        schedule.advance(now);
                    }
                }

                debug!("maintenance thread stopped");
            })
            .map_err(StorageError::Io)?;

        Ok(Some(Self { stop: Some(stop_tx), handle: Some(handle) }))
    }

    /// Whether the thread is still alive.
    pub(crate) fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Signal the thread to stop and wait for it.
    pub(crate) fn shutdown(&mut self) {
        if let Some(stop) = self.stop.take() {
            // The thread may already have exited; a closed channel is fine.
            let _ = stop.send(());
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("maintenance thread panicked");
            }
        }
    }
}

impl Drop for Maintenance {
    fn drop(&mut self) {
        self.shutdown();
    }
}
