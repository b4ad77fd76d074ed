//! # Pipe reader: the consumer endpoint of one sink.
//!
//! [`PipeReader`] implements [`AsyncRead`] over the sink's hand-off
//! channel. Exactly one task is expected to read; the contract makes no
//! promise under multiple simultaneous readers.
//!
//! ## Lifecycle
//! ```text
//! pipe_reader(opts) ──► OPEN: reads pend while no bytes are available
//!        │
//!        ▼ close() / drop
//!      CLOSED: buffered chunks drain, then reads return end-of-stream
//!              (0 bytes); end-of-stream is sticky
//! ```
//!
//! ## Rules
//! - [`PipeCloser::close`] is idempotent and callable from any task; it
//!   cancels the sink token (unblocking in-flight writers) and unregisters
//!   the sink (unblocking a pending read without further writes).
//! - Dropping the reader closes the sink, so an abandoned consumer cannot
//!   stall emitters forever.
//! - A read that races with close still observes every chunk accepted
//!   before the channel emptied; the close is only visible once the
//!   buffer has drained.

use std::future::Future;
use std::io;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use tokio::io::{AsyncRead, ReadBuf};
use tokio::sync::mpsc;
use tokio_util::sync::{CancellationToken, WaitForCancellationFutureOwned};

use super::registry::SinkRegistry;

/// Cloneable close handle for one sink.
///
/// Owned by the consumer side; also embedded in the reader so that drop
/// closes the sink. Close is the only cancellation primitive: it unblocks
/// in-flight writes and reads in bounded time without cooperation from the
/// blocked caller.
#[derive(Clone)]
pub struct PipeCloser {
    token: CancellationToken,
    registry: Arc<SinkRegistry>,
    id: u64,
}

impl PipeCloser {
    pub(crate) fn new(token: CancellationToken, registry: Arc<SinkRegistry>, id: u64) -> Self {
        Self {
            token,
            registry,
            id,
        }
    }

    /// Transitions the sink to CLOSED. Safe to call repeatedly.
    pub fn close(&self) {
        self.token.cancel();
        self.registry.unregister(self.id);
    }

    /// True once the sink has been closed.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Byte-stream reader over one pipe sink.
pub struct PipeReader {
    rx: mpsc::Receiver<Vec<u8>>,
    chunk: Vec<u8>,
    pos: usize,
    done: bool,
    cancelled: Pin<Box<WaitForCancellationFutureOwned>>,
    closer: PipeCloser,
}

impl PipeReader {
    pub(crate) fn new(rx: mpsc::Receiver<Vec<u8>>, closer: PipeCloser) -> Self {
        let cancelled = Box::pin(closer.token.clone().cancelled_owned());
        Self {
            rx,
            chunk: Vec::new(),
            pos: 0,
            done: false,
            cancelled,
            closer,
        }
    }

    /// Returns a close handle usable from another task, e.g. while this
    /// reader is moved into an `io::copy` loop.
    pub fn closer(&self) -> PipeCloser {
        self.closer.clone()
    }

    /// Closes the sink. Equivalent to [`PipeCloser::close`].
    pub fn close(&self) {
        self.closer.close();
    }
}

impl AsyncRead for PipeReader {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let me = self.get_mut();
        loop {
            // Serve leftovers of the current chunk first; a chunk larger
            // than the caller's buffer spans multiple reads.
            if me.pos < me.chunk.len() {
                let n = usize::min(buf.remaining(), me.chunk.len() - me.pos);
                buf.put_slice(&me.chunk[me.pos..me.pos + n]);
                me.pos += n;
                return Poll::Ready(Ok(()));
            }
            if me.done {
                // Sticky end-of-stream: 0 bytes filled.
                return Poll::Ready(Ok(()));
            }
            match me.rx.poll_recv(cx) {
                Poll::Ready(Some(chunk)) => {
                    me.chunk = chunk;
                    me.pos = 0;
                }
                Poll::Ready(None) => {
                    me.done = true;
                    return Poll::Ready(Ok(()));
                }
                // Channel is empty; end the stream if the sink was closed,
                // otherwise wait for the next write or for close.
                Poll::Pending => match me.cancelled.as_mut().poll(cx) {
                    Poll::Ready(()) => {
                        me.done = true;
                        return Poll::Ready(Ok(()));
                    }
                    Poll::Pending => return Poll::Pending,
                },
            }
        }
    }
}

impl Drop for PipeReader {
    fn drop(&mut self) {
        self.closer.close();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::io::AsyncReadExt;
    use tokio::time::timeout;

    use super::*;
    use crate::encode::OutputFormat;
    use crate::pipe::sink::PipeSink;
    use crate::records::Level;

    fn open_pipe() -> (Arc<PipeSink>, PipeReader) {
        let registry = SinkRegistry::new();
        let id = registry.next_id();
        let token = CancellationToken::new();
        let (tx, rx) = mpsc::channel(1);
        let sink = Arc::new(PipeSink::new(
            id,
            Level::Trace,
            OutputFormat::Json,
            tx,
            token.clone(),
        ));
        registry.register(Arc::clone(&sink));
        let reader = PipeReader::new(rx, PipeCloser::new(token, registry, id));
        (sink, reader)
    }

    #[tokio::test]
    async fn test_close_unblocks_pending_read() {
        let (_sink, mut reader) = open_pipe();
        let closer = reader.closer();

        let read = tokio::spawn(async move {
            let mut buf = [0u8; 16];
            reader.read(&mut buf).await
        });

        tokio::task::yield_now().await;
        closer.close();

        let n = timeout(Duration::from_secs(1), read)
            .await
            .expect("read did not unblock after close")
            .unwrap()
            .unwrap();
        assert_eq!(n, 0);
    }

    #[tokio::test]
    async fn test_buffered_chunk_drains_before_eof() {
        let (sink, mut reader) = open_pipe();
        sink.write(b"tail\n".to_vec()).await.unwrap();
        reader.close();

        let mut out = Vec::new();
        reader.read_to_end(&mut out).await.unwrap();
        assert_eq!(out, b"tail\n");

        // End-of-stream is sticky.
        let mut buf = [0u8; 4];
        assert_eq!(reader.read(&mut buf).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_small_destination_buffer_reassembles_chunk() {
        let (sink, mut reader) = open_pipe();
        sink.write(b"abcdef".to_vec()).await.unwrap();

        let mut out = Vec::new();
        let mut buf = [0u8; 2];
        for _ in 0..3 {
            let n = reader.read(&mut buf).await.unwrap();
            out.extend_from_slice(&buf[..n]);
        }
        assert_eq!(out, b"abcdef");
    }

    #[tokio::test]
    async fn test_drop_closes_the_sink() {
        let (sink, reader) = open_pipe();
        drop(reader);
        let err = timeout(Duration::from_secs(1), sink.write(b"x".to_vec()))
            .await
            .expect("write did not fail after reader drop")
            .unwrap_err();
        assert!(err.is_closed());
    }

    #[tokio::test]
    async fn test_double_close_is_a_noop() {
        let (_sink, reader) = open_pipe();
        let closer = reader.closer();
        closer.close();
        closer.close();
        reader.close();
        assert!(closer.is_closed());
    }
}
