use std::fmt;

use segbuf::SegmentedBuffer;
use tracing::warn;

use crate::{CaptureError, Result};

/// Which half of a response a chunk belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Body,
    Header,
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stream::Body => write!(f, "body"),
            Stream::Header => write!(f, "header"),
        }
    }
}

/// Receiver for the chunks a transfer layer delivers, in order.
///
/// Returns how many bytes of `chunk` were taken. Anything short of
/// `chunk.len()` tells the transfer layer to abort the exchange.
pub trait TransferSink {
    fn write_chunk(&mut self, chunk: &[u8]) -> Result<usize>;
}

impl TransferSink for SegmentedBuffer {
    fn write_chunk(&mut self, chunk: &[u8]) -> Result<usize> {
        self.append(chunk)?;
        Ok(chunk.len())
    }
}

impl<S: TransferSink + ?Sized> TransferSink for &mut S {
    fn write_chunk(&mut self, chunk: &[u8]) -> Result<usize> { (**self).write_chunk(chunk) }
}

/// Adapts a closure into a [`TransferSink`].
pub struct FnSink<F>(F);

impl<F> FnSink<F>
where
    F: FnMut(&[u8]) -> Result<usize>,
{
    pub fn new(f: F) -> Self { Self(f) }
}

impl<F> TransferSink for FnSink<F>
where
    F: FnMut(&[u8]) -> Result<usize>,
{
    fn write_chunk(&mut self, chunk: &[u8]) -> Result<usize> { (self.0)(chunk) }
}

/// Sink handed to the transfer layer for one stream of a response.
///
/// Borrows its target buffer for as long as the transfer runs, so the buffer
/// cannot be cleared or dropped underneath it. A sink without a target takes
/// every chunk and keeps nothing.
pub struct ChunkSink<'a> {
    stream: Stream,
    target: Option<&'a mut SegmentedBuffer>,
}

impl<'a> ChunkSink<'a> {
    pub fn new(stream: Stream, target: &'a mut SegmentedBuffer) -> Self {
        Self {
            stream,
            target: Some(target),
        }
    }

    pub fn discard(stream: Stream) -> Self {
        Self {
            stream,
            target: None,
        }
    }

    pub fn stream(&self) -> Stream { self.stream }

    pub fn is_discarding(&self) -> bool { self.target.is_none() }
}

impl TransferSink for ChunkSink<'_> {
    fn write_chunk(&mut self, chunk: &[u8]) -> Result<usize> {
        if let Some(target) = self.target.as_deref_mut() {
            if let Err(err) = target.append(chunk) {
                warn!(stream = %self.stream, len = chunk.len(), "failed to capture chunk: {err}");
                return Err(err.into());
            }
        }
        Ok(chunk.len())
    }
}

/// Push `chunks` through `sink` in order, the way a transfer callback loop does.
///
/// Stops at the first error, or when the sink takes less than a whole chunk.
/// Returns the total number of bytes delivered.
///
/// ```
/// use segbuf::SegmentedBuffer;
/// use segbuf_capture::feed;
///
/// let mut buffer = SegmentedBuffer::new();
/// let total = feed(&mut buffer, ["hello ", "world"]).unwrap();
///
/// assert_eq!(total, 11);
/// assert_eq!(buffer.to_vec().unwrap(), b"hello world");
/// ```
pub fn feed<S, I>(mut sink: S, chunks: I) -> Result<usize>
where
    S: TransferSink,
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let mut total = 0;
    for chunk in chunks {
        let chunk = chunk.as_ref();
        let accepted = sink.write_chunk(chunk)?;
        if accepted != chunk.len() {
            return Err(CaptureError::Aborted {
                offered: chunk.len(),
                accepted,
            });
        }
        total += accepted;
    }
    Ok(total)
}
