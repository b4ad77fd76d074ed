//! Error types used by the tee and its pipe sinks.
//!
//! Two small enums:
//!
//! - [`PipeError`] — failures of pipe-sink writes, most notably the
//!   closed-pipe condition a direct writer must be able to detect.
//! - [`EncodeError`] — failures while encoding a record for one sink.
//!
//! Inside the fan-out hook both are contained per sink and never surfaced
//! to the code that issued the log statement.

use thiserror::Error;

/// Errors produced by pipe-sink writes.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum PipeError {
    /// The sink was closed; no further writes will be accepted.
    ///
    /// Returned immediately when the sink is already closed, and returned
    /// by an in-flight write that was unblocked by a concurrent close.
    #[error("pipe sink is closed")]
    Closed,
}

impl PipeError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            PipeError::Closed => "pipe_closed",
        }
    }

    /// True if this error means the sink will never accept bytes again.
    #[inline]
    pub fn is_closed(&self) -> bool {
        matches!(self, PipeError::Closed)
    }
}

/// Errors produced while encoding a record for a sink.
///
/// Fatal only for that record on that sink: the record is dropped for the
/// sink and dispatch continues with the remaining sinks.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum EncodeError {
    /// Structured encoding failed.
    #[error("json encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}
