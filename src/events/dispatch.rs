use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{trace, warn};

use crate::error::{SyncError, SyncResult};

/// Handle returned when a listener is added; usable for later removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ListenerId(u64);

impl ListenerId {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Outcome of one fan-out pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DispatchReport {
    pub delivered: usize,
    pub failed: usize,
    pub skipped: usize,
}

struct ListenerEntry<L: ?Sized> {
    id: ListenerId,
    listener: Arc<L>,
}

type ListenerSnapshot<L> = SmallVec<[(ListenerId, Arc<L>); 8]>;

/// Ordered, thread-safe listener list with failure-isolating fan-out.
///
/// Delivery iterates a snapshot taken under a short read lock, so listeners
/// may add or remove listeners (including themselves) while being notified.
/// Such changes apply from the next dispatch on.
pub struct ListenerSet<L: ?Sized> {
    entries: RwLock<Vec<ListenerEntry<L>>>,
    next_id: AtomicU64,
    failures: AtomicU64,
}

impl<L: ?Sized> Default for ListenerSet<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: ?Sized> ListenerSet<L> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
            failures: AtomicU64::new(0),
        }
    }

    pub fn add(&self, listener: Arc<L>) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.entries.write().push(ListenerEntry { id, listener });
        id
    }

    /// Removes the first entry holding this exact allocation.
    pub fn remove(&self, listener: &Arc<L>) -> bool {
        let mut entries = self.entries.write();
        match entries
            .iter()
            .position(|entry| Arc::ptr_eq(&entry.listener, listener))
        {
            Some(position) => {
                entries.remove(position);
                true
            }
            None => false,
        }
    }

    pub fn remove_id(&self, id: ListenerId) -> bool {
        let mut entries = self.entries.write();
        match entries.iter().position(|entry| entry.id == id) {
            Some(position) => {
                entries.remove(position);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Cumulative number of failed deliveries since construction.
    #[must_use]
    pub fn failure_count(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }

    fn snapshot(&self) -> ListenerSnapshot<L> {
        self.entries
            .read()
            .iter()
            .map(|entry| (entry.id, Arc::clone(&entry.listener)))
            .collect()
    }

    /// Delivers to every listener in registration order.
    ///
    /// `accepts` filters listeners before delivery. A listener returning `Err`
    /// or, when `catch_panics` is set, panicking is logged and counted; the
    /// remaining listeners are still notified.
    pub fn dispatch<A, D>(
        &self,
        event_kind: &'static str,
        catch_panics: bool,
        accepts: A,
        mut deliver: D,
    ) -> DispatchReport
    where
        A: Fn(&L) -> bool,
        D: FnMut(&L) -> SyncResult<()>,
    {
        let mut report = DispatchReport::default();
        for (id, listener) in self.snapshot() {
            if !accepts(&*listener) {
                report.skipped += 1;
                continue;
            }
            let outcome = if catch_panics {
                panic::catch_unwind(AssertUnwindSafe(|| deliver(&*listener)))
                    .unwrap_or_else(|payload| Err(SyncError::Listener(panic_message(&*payload))))
            } else {
                deliver(&*listener)
            };
            match outcome {
                Ok(()) => report.delivered += 1,
                Err(err) => {
                    report.failed += 1;
                    self.failures.fetch_add(1, Ordering::Relaxed);
                    warn!(
                        event = event_kind,
                        listener_id = id.get(),
                        error = %err,
                        "listener failed; continuing fan-out"
                    );
                }
            }
        }
        trace!(
            event = event_kind,
            delivered = report.delivered,
            failed = report.failed,
            skipped = report.skipped,
            "listener fan-out complete"
        );
        report
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("listener panicked: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("listener panicked: {message}")
    } else {
        "listener panicked".to_owned()
    }
}
