//! # Named logger handles.
//!
//! [`Logger`] is the minimal built-in engine driving the tee: it stamps
//! records with a subsystem name and hands them to the fan-out hook. When
//! the primary stderr mirror is enabled it also writes a plaintext line
//! for records at or above the configured mirror level.
//!
//! Pipe sinks are **not** gated by the mirror level: every record reaches
//! [`LogTee::dispatch`], where each sink applies its own threshold.

use std::io::Write;
use std::sync::Arc;

use crate::encode::{self, OutputFormat};
use crate::records::{Level, Record};
use crate::tee::LogTee;

/// Handle for emitting records from one named subsystem.
///
/// Cheap to clone; clones share the same tee.
#[derive(Clone)]
pub struct Logger {
    name: Arc<str>,
    tee: Arc<LogTee>,
}

impl Logger {
    pub(crate) fn new(name: impl Into<Arc<str>>, tee: Arc<LogTee>) -> Self {
        Self {
            name: name.into(),
            tee,
        }
    }

    /// The subsystem name stamped on emitted records.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Emits a fully built record.
    ///
    /// The logger name is stamped unless the record already carries one.
    /// Completes once every matching open sink has accepted the record;
    /// sinks closed mid-delivery are silent misses.
    pub async fn log(&self, record: Record) {
        let record = if record.logger.is_none() {
            record.with_logger(Arc::clone(&self.name))
        } else {
            record
        };

        let cfg = self.tee.config();
        if cfg.stderr && record.level >= cfg.level {
            if let Ok(line) = encode::encode(&record, OutputFormat::Plaintext) {
                let _ = std::io::stderr().write_all(&line);
            }
        }

        self.tee.dispatch(&record).await;
    }

    /// Emits a trace-level message.
    pub async fn trace(&self, msg: impl Into<Arc<str>>) {
        self.log(Record::new(Level::Trace, msg)).await;
    }

    /// Emits a debug-level message.
    pub async fn debug(&self, msg: impl Into<Arc<str>>) {
        self.log(Record::new(Level::Debug, msg)).await;
    }

    /// Emits an info-level message.
    pub async fn info(&self, msg: impl Into<Arc<str>>) {
        self.log(Record::new(Level::Info, msg)).await;
    }

    /// Emits a warn-level message.
    pub async fn warn(&self, msg: impl Into<Arc<str>>) {
        self.log(Record::new(Level::Warn, msg)).await;
    }

    /// Emits an error-level message.
    pub async fn error(&self, msg: impl Into<Arc<str>>) {
        self.log(Record::new(Level::Error, msg)).await;
    }
}
