//! # Log records emitted into the fan-out path.
//!
//! A [`Record`] is the unit handed to the tee for every log statement:
//! severity, subsystem name, message, structured key/value fields and a
//! wall-clock timestamp. Records are immutable once built; the tee only
//! reads and encodes them.
//!
//! ## Ordering guarantees
//! Each record carries a globally unique sequence number (`seq`) that
//! increases monotonically. Per-sink byte order follows write completion
//! order; `seq` lets a consumer restore emission order across sinks.
//!
//! ## Example
//! ```rust
//! use logtee::{Level, Record};
//!
//! let rec = Record::new(Level::Warn, "disk almost full")
//!     .with_logger("storage")
//!     .with_field("free_bytes", 1024);
//!
//! assert_eq!(rec.level, Level::Warn);
//! assert_eq!(rec.logger.as_deref(), Some("storage"));
//! ```

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::SystemTime;

use serde_json::Value;

use super::level::Level;

/// Global sequence counter for record ordering.
static RECORD_SEQ: AtomicU64 = AtomicU64::new(0);

/// One emitted log event.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp
/// - `fields`: structured key/value pairs, encoded alongside the message
#[derive(Clone, Debug)]
pub struct Record {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp taken at construction.
    pub at: SystemTime,
    /// Severity of this record.
    pub level: Level,
    /// Name of the emitting subsystem, if any.
    pub logger: Option<Arc<str>>,
    /// Human-readable message.
    pub message: Arc<str>,
    /// Structured key/value fields in insertion order.
    pub fields: Vec<(Arc<str>, Value)>,
}

impl Record {
    /// Creates a new record with the current timestamp and next sequence number.
    pub fn new(level: Level, message: impl Into<Arc<str>>) -> Self {
        Self {
            seq: RECORD_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            level,
            logger: None,
            message: message.into(),
            fields: Vec::new(),
        }
    }

    /// Attaches the emitting subsystem name.
    #[inline]
    pub fn with_logger(mut self, logger: impl Into<Arc<str>>) -> Self {
        self.logger = Some(logger.into());
        self
    }

    /// Appends one structured key/value field.
    #[inline]
    pub fn with_field(mut self, key: impl Into<Arc<str>>, value: impl Into<Value>) -> Self {
        self.fields.push((key.into(), value.into()));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seq_is_monotonic() {
        let a = Record::new(Level::Info, "a");
        let b = Record::new(Level::Info, "b");
        assert!(b.seq > a.seq);
    }

    #[test]
    fn test_builder_fields_keep_order() {
        let rec = Record::new(Level::Debug, "m")
            .with_field("first", 1)
            .with_field("second", "two");
        assert_eq!(rec.fields[0].0.as_ref(), "first");
        assert_eq!(rec.fields[1].0.as_ref(), "second");
    }
}
