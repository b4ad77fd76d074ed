//! # logtee
//!
//! **logtee** is a multiplexed pipe-sink tee for structured logging: any
//! number of independent consumers attach a readable byte stream to the
//! live log output of the process, each with its own severity threshold
//! and wire encoding, without affecting other consumers or the primary
//! destinations.
//!
//! ## Architecture
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │   Logger "A" │   │   Logger "B" │   │   Logger "N" │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────┐
//! │  LogTee (fan-out hook)                                        │
//! │  - SinkRegistry (lock-protected set of open sinks)            │
//! │  - per-record encode cache (one encode per format in use)     │
//! │  - guarded per-sink dispatch (failures contained locally)     │
//! └──────┬──────────────────────┬──────────────────────┬──────────┘
//!        ▼                      ▼                      ▼
//!   ┌──────────┐           ┌──────────┐           ┌──────────┐
//!   │ PipeSink │ cap=1     │ PipeSink │ cap=1     │ PipeSink │
//!   │ ≥ Trace  │──chan──►  │ ≥ Error  │──chan──►  │ ≥ Info   │──chan──►
//!   │ Json     │           │ Plaintext│           │ Json     │
//!   └──────────┘           └──────────┘           └──────────┘
//!        │                      │                      │
//!        ▼                      ▼                      ▼
//!   PipeReader             PipeReader             PipeReader
//!   (AsyncRead, one consumer task each; close/drop ends the stream)
//! ```
//!
//! ## Guarantees
//! - Every open sink receives every record at or above its threshold.
//! - Emitters never deadlock or panic because a consumer is slow or gone:
//!   a slow reader backpressures only its own sink (one-slot hand-off),
//!   and a closed sink turns writes into silent misses.
//! - Close is idempotent and unblocks in-flight reads and writes in
//!   bounded time; after close, reads drain buffered bytes then signal
//!   end-of-stream.
//! - Records are delivered as whole encoded units, so concurrent emitters
//!   interleave at record granularity, never mid-line.
//!
//! ## Example
//! ```rust
//! use tokio::io::AsyncReadExt;
//! use logtee::{Config, Level, LogTee, OutputFormat, PipeOpts};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let tee = LogTee::new(Config::default());
//!
//!     let reader = tee.pipe_reader(
//!         PipeOpts::default()
//!             .with_level(Level::Warn)
//!             .with_format(OutputFormat::Plaintext),
//!     );
//!     let closer = reader.closer();
//!     let consumer = tokio::spawn(async move {
//!         let mut reader = reader;
//!         let mut out = Vec::new();
//!         reader.read_to_end(&mut out).await.unwrap();
//!         String::from_utf8(out).unwrap()
//!     });
//!
//!     let log = tee.logger("app");
//!     log.info("below this sink's threshold").await;
//!     log.error("disk failure").await;
//!     closer.close();
//!
//!     let out = consumer.await.unwrap();
//!     assert!(out.contains("disk failure"));
//!     assert!(!out.contains("below this sink's threshold"));
//! }
//! ```
//!
//! A process-wide facility is available through [`setup_logging`],
//! [`logger`] and [`pipe_reader`] for code that cannot thread a
//! [`LogTee`] handle around.

mod config;
mod encode;
mod error;
mod global;
mod logger;
mod pipe;
mod records;
mod tee;

// ---- Public re-exports ----

pub use config::Config;
pub use encode::{OutputFormat, ParseFormatError};
pub use error::{EncodeError, PipeError};
pub use global::{logger, pipe_reader, setup_logging, tee};
pub use logger::Logger;
pub use pipe::{PipeCloser, PipeOpts, PipeReader, PipeSink, SinkRegistry};
pub use records::{Level, ParseLevelError, Record};
pub use tee::{Hook, LogTee};
