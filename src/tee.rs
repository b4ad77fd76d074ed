//! # Fan-out hook: one record in, every matching sink out.
//!
//! [`LogTee`] owns the [`SinkRegistry`] and dispatches each emitted record
//! to every open sink whose threshold is met, in that sink's encoding.
//!
//! ## Architecture
//! ```text
//! Emitters (many):                         Consumers (one per sink):
//!   Logger A ──┐
//!   Logger B ──┼──► LogTee::dispatch ──► snapshot ──► per sink:
//!   Logger N ──┘        (Hook)                 filter ≥ threshold
//!                                              encode (cached per format)
//!                                              write  (guarded)
//! ```
//!
//! ## Rules
//! - Dispatch is invoked synchronously on the emitter's own task; many
//!   emitters dispatch concurrently for different records.
//! - A record is written to a sink as **one** encoded unit, so concurrent
//!   emitters interleave at record granularity.
//! - Per-sink failures are contained: a closed pipe is a delivery miss, an
//!   encoding failure drops the record for that sink only, and panics are
//!   caught. Dispatch itself never fails the logging call and never
//!   retries.
//! - Each record is encoded at most once per format in use, however many
//!   sinks share that format.

use std::panic::AssertUnwindSafe;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use futures::FutureExt;

use crate::config::Config;
use crate::encode::{self, OutputFormat};
use crate::logger::Logger;
use crate::pipe::{self, PipeOpts, PipeReader, SinkRegistry};
use crate::records::{Level, Record};

/// Integration point between a logging engine and the tee.
///
/// A logging engine registers one hook and invokes it with every
/// constructed record, after whatever filtering the engine applies to its
/// own primary destinations. Implementations must never propagate a
/// failure back into the logging call.
#[async_trait]
pub trait Hook: Send + Sync + 'static {
    /// Processes one emitted record.
    async fn on_record(&self, record: &Record);

    /// Returns the hook name used in diagnostics.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// The multiplexed pipe-sink tee.
///
/// One instance per process is typical (see [`crate::setup_logging`] and
/// friends), but instances are self-contained: each owns its registry and
/// defaults, which is what the tests rely on for isolation.
pub struct LogTee {
    registry: Arc<SinkRegistry>,
    config: RwLock<Config>,
}

impl LogTee {
    /// Creates a tee with the given defaults and an empty registry.
    pub fn new(config: Config) -> Arc<Self> {
        Arc::new(Self {
            registry: SinkRegistry::new(),
            config: RwLock::new(config),
        })
    }

    /// Returns the current facility defaults.
    pub fn config(&self) -> Config {
        *self.config.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Replaces the facility defaults. Existing sinks keep the level and
    /// format they were created with.
    pub fn set_config(&self, config: Config) {
        *self.config.write().unwrap_or_else(|e| e.into_inner()) = config;
    }

    /// The registry of currently open sinks.
    pub fn registry(&self) -> &SinkRegistry {
        &self.registry
    }

    /// Opens a new pipe sink and returns its consumer endpoint.
    ///
    /// Defaults: accept all levels, process default format.
    pub fn pipe_reader(&self, opts: PipeOpts) -> PipeReader {
        let level = opts.level.unwrap_or(Level::Trace);
        let format = opts.format.unwrap_or(self.config().format);
        pipe::open(&self.registry, level, format)
    }

    /// Creates a named logger bound to this tee.
    pub fn logger(self: &Arc<Self>, name: impl Into<Arc<str>>) -> Logger {
        Logger::new(name, Arc::clone(self))
    }

    /// Dispatches one record to every matching open sink.
    pub async fn dispatch(&self, record: &Record) {
        let sinks = self.registry.snapshot();
        if sinks.is_empty() {
            return;
        }

        let mut cache = EncodedCache::default();
        for sink in sinks {
            if record.level < sink.level() {
                continue;
            }
            let Some(bytes) = cache.get(record, sink.format()) else {
                continue;
            };
            // Guarded per-sink delivery: a closed pipe is a miss, not an
            // error, and a misbehaving sink must not abort the iteration.
            let delivery = async {
                let _ = sink.write(bytes).await;
            };
            let _ = AssertUnwindSafe(delivery).catch_unwind().await;
        }
    }
}

#[async_trait]
impl Hook for LogTee {
    async fn on_record(&self, record: &Record) {
        self.dispatch(record).await;
    }

    fn name(&self) -> &'static str {
        "logtee"
    }
}

/// Per-dispatch memo of encoded output, one slot per format.
///
/// The outer `Option` is "not attempted yet"; the inner one is "attempted,
/// may have failed" so a failing encoder is not retried for every sink.
#[derive(Default)]
struct EncodedCache {
    text: Option<Option<Arc<[u8]>>>,
    json: Option<Option<Arc<[u8]>>>,
}

impl EncodedCache {
    fn get(&mut self, record: &Record, format: OutputFormat) -> Option<Vec<u8>> {
        let slot = match format {
            OutputFormat::Plaintext => &mut self.text,
            OutputFormat::Json => &mut self.json,
        };
        let entry =
            slot.get_or_insert_with(|| encode::encode(record, format).ok().map(Arc::from));
        entry.as_ref().map(|bytes| bytes.to_vec())
    }
}
