//! # Pipe sink: the registered writer endpoint.
//!
//! A [`PipeSink`] wraps one side of a bounded hand-off channel together
//! with the sink's severity threshold, encoding and a cancellation token
//! that represents the OPEN→CLOSED transition.
//!
//! ## Rules
//! - `write()` never blocks once the sink is closed: it fails fast with
//!   [`PipeError::Closed`].
//! - An open sink with no consuming reader makes `write()` wait until the
//!   reader accepts the chunk, **unless** the sink closes in the meantime,
//!   in which case the wait is abandoned with [`PipeError::Closed`].
//! - `write()` is safe to call from many tasks concurrently; each chunk is
//!   delivered whole, so concurrent writers interleave at chunk granularity.
//! - Closing is owned by the consumer side (see
//!   [`PipeCloser`](crate::pipe::PipeCloser)); the sink itself only observes
//!   the token.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::encode::OutputFormat;
use crate::error::PipeError;
use crate::records::Level;

/// Writer endpoint of one registered consumer.
///
/// Held by the [`SinkRegistry`](crate::pipe::SinkRegistry) and handed out
/// in snapshots to the fan-out hook. Cheap to share via `Arc`.
pub struct PipeSink {
    id: u64,
    level: Level,
    format: OutputFormat,
    tx: mpsc::Sender<Vec<u8>>,
    token: CancellationToken,
}

impl PipeSink {
    pub(crate) fn new(
        id: u64,
        level: Level,
        format: OutputFormat,
        tx: mpsc::Sender<Vec<u8>>,
        token: CancellationToken,
    ) -> Self {
        Self {
            id,
            level,
            format,
            tx,
            token,
        }
    }

    /// Stable identity of this sink within the registry.
    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Minimum severity delivered to this sink (inclusive).
    #[inline]
    pub fn level(&self) -> Level {
        self.level
    }

    /// Wire encoding selected for this sink.
    #[inline]
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// True once the consumer closed this sink.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Delivers one chunk to the sink's reader.
    ///
    /// Waits for the hand-off channel to accept the chunk. Returns
    /// [`PipeError::Closed`] immediately if the sink is already closed, or
    /// as soon as a concurrent close unblocks the wait. Never panics.
    pub async fn write(&self, chunk: Vec<u8>) -> Result<(), PipeError> {
        if self.token.is_cancelled() {
            return Err(PipeError::Closed);
        }
        tokio::select! {
            _ = self.token.cancelled() => Err(PipeError::Closed),
            sent = self.tx.send(chunk) => sent.map_err(|_| PipeError::Closed),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use tokio::time::timeout;

    use super::*;

    fn sink_pair(capacity: usize) -> (PipeSink, mpsc::Receiver<Vec<u8>>, CancellationToken) {
        let (tx, rx) = mpsc::channel(capacity);
        let token = CancellationToken::new();
        let sink = PipeSink::new(1, Level::Trace, OutputFormat::Json, tx, token.clone());
        (sink, rx, token)
    }

    #[tokio::test]
    async fn test_write_after_close_fails_immediately() {
        let (sink, _rx, token) = sink_pair(1);
        token.cancel();
        let err = sink.write(b"x".to_vec()).await.unwrap_err();
        assert!(err.is_closed());
    }

    #[tokio::test]
    async fn test_blocked_write_unblocked_by_close() {
        let (sink, _rx, token) = sink_pair(1);
        // First chunk fills the hand-off slot; the second must wait.
        sink.write(b"a".to_vec()).await.unwrap();

        let sink = Arc::new(sink);
        let writer = {
            let sink = Arc::clone(&sink);
            tokio::spawn(async move { sink.write(b"b".to_vec()).await })
        };

        tokio::task::yield_now().await;
        token.cancel();

        let result = timeout(Duration::from_secs(1), writer)
            .await
            .expect("write did not unblock after close")
            .unwrap();
        assert!(result.unwrap_err().is_closed());
    }

    #[tokio::test]
    async fn test_delivered_chunks_arrive_whole_and_in_order() {
        let (sink, mut rx, _token) = sink_pair(1);
        let sink = Arc::new(sink);

        let writer = {
            let sink = Arc::clone(&sink);
            tokio::spawn(async move {
                for i in 0..5u8 {
                    sink.write(vec![i; 3]).await.unwrap();
                }
            })
        };

        for i in 0..5u8 {
            let chunk = rx.recv().await.unwrap();
            assert_eq!(chunk, vec![i; 3]);
        }
        writer.await.unwrap();
    }
}
