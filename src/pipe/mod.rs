//! # Pipe sinks: per-consumer byte streams over the live log output.
//!
//! Each sink is a bounded hand-off channel with explicit OPEN/CLOSED state,
//! a severity threshold and a wire encoding.
//!
//! ## Architecture
//! ```text
//! Emitters (many):                        Consumer (one per sink):
//!   write ──┐
//!   write ──┼──► PipeSink ──[chan cap=1]──► PipeReader (AsyncRead)
//!   write ──┘        ▲                           │
//!                    │ CancellationToken         │ close() / drop
//!                    └────────── PipeCloser ◄────┘
//!
//! SinkRegistry: {id → Arc<PipeSink>} — register on open, unregister on close
//! ```
//!
//! ## Contents
//! - [`PipeSink`] writer endpoint with closed-state aware `write`
//! - [`PipeReader`] sole consumer endpoint, drains then signals end-of-stream
//! - [`PipeCloser`] idempotent, cloneable close handle
//! - [`SinkRegistry`] lock-protected set of open sinks
//! - [`PipeOpts`] per-sink level/format options

mod options;
mod reader;
mod registry;
mod sink;

pub use options::PipeOpts;
pub use reader::{PipeCloser, PipeReader};
pub use registry::SinkRegistry;
pub use sink::PipeSink;

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::encode::OutputFormat;
use crate::records::Level;

/// Hand-off channel capacity per sink.
///
/// One slot is the tokio mpsc minimum and gives near-rendezvous behavior:
/// a writer runs at most one record ahead of the reader, so a slow
/// consumer backpressures its own sink without unbounded buffering.
const HANDOFF_CAPACITY: usize = 1;

/// Opens a new sink: builds the channel pair, registers the writer side
/// and returns the consumer endpoint.
pub(crate) fn open(registry: &Arc<SinkRegistry>, level: Level, format: OutputFormat) -> PipeReader {
    let id = registry.next_id();
    let token = CancellationToken::new();
    let (tx, rx) = mpsc::channel(HANDOFF_CAPACITY);

    let sink = Arc::new(PipeSink::new(id, level, format, tx, token.clone()));
    registry.register(sink);

    PipeReader::new(rx, PipeCloser::new(token, Arc::clone(registry), id))
}
