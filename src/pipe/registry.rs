//! # Sink registry: process-wide set of open pipe sinks.
//!
//! The registry is the only structure in this crate mutated by unrelated
//! tasks concurrently: consumers register on creation, close paths
//! unregister, and every emitter snapshots it during fan-out.
//!
//! ## Rules
//! - `snapshot()` clones the current membership and releases the lock
//!   before any encoding or writing happens; dispatch never holds the lock.
//! - A sink that completed `unregister()` before a snapshot is never part
//!   of that snapshot. A sink closing *during* dispatch may still appear in
//!   an older snapshot; its own `write()` fails with `Closed` and the miss
//!   is absorbed by the hook.
//! - `unregister()` is idempotent; the close path may run more than once.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::{Arc, Mutex, MutexGuard};

use super::sink::PipeSink;

/// Concurrency-safe collection of currently open sinks.
pub struct SinkRegistry {
    sinks: Mutex<HashMap<u64, Arc<PipeSink>>>,
    next_id: AtomicU64,
}

impl SinkRegistry {
    /// Creates an empty registry.
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            sinks: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(0),
        })
    }

    /// Allocates the identity for the next sink.
    pub(crate) fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, AtomicOrdering::Relaxed)
    }

    /// Adds a sink to the active set.
    pub(crate) fn register(&self, sink: Arc<PipeSink>) {
        self.lock().insert(sink.id(), sink);
    }

    /// Removes a sink from the active set. Returns `false` when the sink
    /// was already gone (double close).
    pub(crate) fn unregister(&self, id: u64) -> bool {
        self.lock().remove(&id).is_some()
    }

    /// Point-in-time clone of the active set for fan-out iteration.
    pub fn snapshot(&self) -> Vec<Arc<PipeSink>> {
        self.lock().values().cloned().collect()
    }

    /// Number of currently open sinks.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// True if no sinks are open.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // Membership operations never panic while holding the lock, but a
    // poisoned mutex must not take the whole logging path down with it.
    fn lock(&self) -> MutexGuard<'_, HashMap<u64, Arc<PipeSink>>> {
        self.sinks.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;
    use tokio_util::sync::CancellationToken;

    use super::*;
    use crate::encode::OutputFormat;
    use crate::records::Level;

    fn make_sink(id: u64) -> Arc<PipeSink> {
        let (tx, _rx) = mpsc::channel(1);
        Arc::new(PipeSink::new(
            id,
            Level::Trace,
            OutputFormat::Json,
            tx,
            CancellationToken::new(),
        ))
    }

    #[test]
    fn test_register_snapshot_unregister() {
        let registry = SinkRegistry::new();
        let a = registry.next_id();
        let b = registry.next_id();
        assert_ne!(a, b);

        registry.register(make_sink(a));
        registry.register(make_sink(b));
        assert_eq!(registry.snapshot().len(), 2);

        assert!(registry.unregister(a));
        let snapshot = registry.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id(), b);
    }

    #[test]
    fn test_unregister_is_idempotent() {
        let registry = SinkRegistry::new();
        let id = registry.next_id();
        registry.register(make_sink(id));

        assert!(registry.unregister(id));
        assert!(!registry.unregister(id));
        assert!(registry.is_empty());
    }
}
