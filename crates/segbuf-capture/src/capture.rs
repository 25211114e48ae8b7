use segbuf::{BufferConfig, SegmentedBuffer};
use tracing::debug;

use crate::sink::{ChunkSink, Stream};
use crate::Result;

/// Body and header buffers for a client that performs one exchange at a time.
///
/// Both buffers are owned independently and survive across exchanges;
/// [`begin_exchange`](Self::begin_exchange) empties them without giving their
/// storage back. The flattened text of each is computed on first request and
/// cached until the buffer can change again.
///
/// # Examples
///
/// ```
/// use segbuf_capture::{ResponseCapture, TransferSink};
///
/// let mut capture = ResponseCapture::new().capture_headers(true);
///
/// capture.begin_exchange();
/// capture.header_sink().write_chunk(b"HTTP/1.1 200 OK\r\n").unwrap();
/// capture.body_sink().write_chunk(b"{\"ok\":true}").unwrap();
///
/// assert_eq!(capture.response_header().unwrap(), "HTTP/1.1 200 OK\r\n");
/// assert_eq!(capture.response_text().unwrap(), "{\"ok\":true}");
/// capture.finish();
/// ```
#[derive(Debug)]
pub struct ResponseCapture {
    body:            SegmentedBuffer,
    header:          SegmentedBuffer,
    capture_headers: bool,
    body_text:       Option<String>,
    header_text:     Option<String>,
}

impl Default for ResponseCapture {
    fn default() -> Self { Self::new() }
}

impl ResponseCapture {
    pub fn new() -> Self { Self::with_config(BufferConfig::default()) }

    pub fn with_config(config: BufferConfig) -> Self {
        Self {
            body:            SegmentedBuffer::with_config(config),
            header:          SegmentedBuffer::with_config(config),
            capture_headers: false,
            body_text:       None,
            header_text:     None,
        }
    }

    /// Keep header chunks instead of discarding them. Off by default.
    #[must_use]
    pub fn capture_headers(mut self, enabled: bool) -> Self {
        self.capture_headers = enabled;
        self
    }

    pub fn set_capture_headers(&mut self, enabled: bool) { self.capture_headers = enabled; }

    pub fn is_capturing_headers(&self) -> bool { self.capture_headers }

    /// Reset both buffers for a new exchange, keeping their storage.
    pub fn begin_exchange(&mut self) {
        self.body.clear();
        self.header.clear();
        self.body_text = None;
        self.header_text = None;
        debug!(
            allocated = self.body.allocated() + self.header.allocated(),
            "starting exchange"
        );
    }

    /// Sink for response body chunks.
    pub fn body_sink(&mut self) -> ChunkSink<'_> {
        self.body_text = None;
        ChunkSink::new(Stream::Body, &mut self.body)
    }

    /// Sink for response header chunks. Discards them unless header capture is on.
    pub fn header_sink(&mut self) -> ChunkSink<'_> {
        if !self.capture_headers {
            return ChunkSink::discard(Stream::Header);
        }
        self.header_text = None;
        ChunkSink::new(Stream::Header, &mut self.header)
    }

    /// Both sinks at once, for transfer layers that interleave the streams.
    pub fn sinks(&mut self) -> (ChunkSink<'_>, ChunkSink<'_>) {
        self.body_text = None;
        self.header_text = None;
        let header = if self.capture_headers {
            ChunkSink::new(Stream::Header, &mut self.header)
        } else {
            ChunkSink::discard(Stream::Header)
        };
        (ChunkSink::new(Stream::Body, &mut self.body), header)
    }

    pub fn body(&self) -> &SegmentedBuffer { &self.body }

    pub fn header(&self) -> &SegmentedBuffer { &self.header }

    /// Response body as text. Invalid UTF-8 is replaced.
    pub fn response_text(&mut self) -> Result<&str> {
        if self.body_text.is_none() {
            self.body_text = Some(flatten_text(&self.body)?);
        }
        Ok(self.body_text.as_deref().unwrap_or_default())
    }

    /// Raw response header block as text. Empty unless header capture is on.
    pub fn response_header(&mut self) -> Result<&str> {
        if self.header_text.is_none() {
            self.header_text = Some(flatten_text(&self.header)?);
        }
        Ok(self.header_text.as_deref().unwrap_or_default())
    }

    /// Release both buffers.
    pub fn finish(self) {
        debug!("releasing response buffers");
        self.body.destroy();
        self.header.destroy();
    }
}

fn flatten_text(buffer: &SegmentedBuffer) -> Result<String> {
    let bytes = buffer.to_vec()?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    })
}
