use std::fmt;
use std::io;

use bytes::Bytes;
use tracing::{debug, trace};

use crate::dump::{Dump, SegmentInfo};
use crate::segment::Segment;
use crate::{BufferConfig, BufferError, Result};

/// An append-only byte accumulator backed by a chain of fixed-capacity segments.
///
/// Data is written at the logical end and read back whole, either as a
/// length or flattened into contiguous memory. [`clear`](Self::clear) resets the
/// content but keeps every segment allocated, so a buffer reused across many
/// transfers stops allocating once it has seen its largest payload.
///
/// Logical content ends at the first segment with nothing written into it.
/// Segments past that point are spare capacity left over from a previous
/// [`clear`](Self::clear).
///
/// # Examples
///
/// ```
/// use segbuf::SegmentedBuffer;
///
/// let mut buffer = SegmentedBuffer::new();
/// buffer.append(b"hello ").unwrap();
/// buffer.append(b"world").unwrap();
///
/// assert_eq!(buffer.len(), 11);
/// assert_eq!(buffer.to_vec().unwrap(), b"hello world");
/// ```
pub struct SegmentedBuffer {
    segments: Vec<Segment>,
    config:   BufferConfig,
}

impl Default for SegmentedBuffer {
    fn default() -> Self { Self::new() }
}

impl SegmentedBuffer {
    /// Create an empty buffer. Nothing is allocated until the first append.
    pub fn new() -> Self { Self::with_config(BufferConfig::default()) }

    pub fn with_config(config: BufferConfig) -> Self {
        Self {
            segments: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &BufferConfig { &self.config }

    /// Append `bytes` after the current content.
    ///
    /// Appending an empty slice is a no-op. Spare segments left by
    /// [`clear`](Self::clear) are filled before anything new is allocated, and
    /// at most one new segment of `max(overflow, chunk_size)` bytes is created.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::AllocationFailure`] if a new segment cannot be
    /// reserved. The buffer is left exactly as it was before the call.
    pub fn append(&mut self, bytes: &[u8]) -> Result<()> {
        if bytes.is_empty() {
            return Ok(());
        }

        let tail = match self.tail_index() {
            Some(tail) => tail,
            None => {
                self.push_segment(bytes.len())?;
                0
            }
        };

        let tail_spare = self.segments[tail].remaining();
        let spare: usize = self.segments[tail..].iter().map(Segment::remaining).sum();
        if bytes.len() > tail_spare && spare > tail_spare {
            trace!(tail, spare, "reusing spare segments");
        }
        if spare < bytes.len() {
            self.push_segment(bytes.len() - spare)?;
        }

        let mut rest = bytes;
        for segment in &mut self.segments[tail..] {
            let written = segment.write(rest);
            rest = &rest[written..];
            if rest.is_empty() {
                break;
            }
        }
        debug_assert!(rest.is_empty(), "append left {} bytes unwritten", rest.len());

        Ok(())
    }

    /// Total number of logical bytes. Walks the chain, so O(segments).
    pub fn len(&self) -> usize { self.logical().map(Segment::used).sum() }

    pub fn is_empty(&self) -> bool { self.segments.first().is_none_or(|s| s.used() == 0) }

    /// Copy the logical content into the front of `dest`, returning the number
    /// of bytes written (always equal to [`len`](Self::len)).
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::DestinationTooSmall`] without touching `dest` if
    /// it is shorter than [`len`](Self::len).
    pub fn flatten(&self, dest: &mut [u8]) -> Result<usize> {
        let needed = self.len();
        if dest.len() < needed {
            return Err(BufferError::DestinationTooSmall {
                needed,
                available: dest.len(),
            });
        }

        let mut offset = 0;
        for chunk in self.chunks() {
            dest[offset..offset + chunk.len()].copy_from_slice(chunk);
            offset += chunk.len();
        }
        Ok(offset)
    }

    /// Flatten into a freshly allocated vector.
    pub fn to_vec(&self) -> Result<Vec<u8>> {
        let needed = self.len();
        let mut out = Vec::new();
        out.try_reserve_exact(needed)
            .map_err(|_| BufferError::AllocationFailure { requested: needed })?;
        for chunk in self.chunks() {
            out.extend_from_slice(chunk);
        }
        Ok(out)
    }

    pub fn to_bytes(&self) -> Result<Bytes> { self.to_vec().map(Bytes::from) }

    /// Iterate the logical content as borrowed slices, one per segment.
    pub fn chunks(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.logical().map(Segment::as_slice)
    }

    /// Forget the content but keep every segment for later appends.
    pub fn clear(&mut self) {
        for segment in &mut self.segments {
            segment.clear();
        }
        trace!(
            segments = self.segments.len(),
            allocated = self.allocated(),
            "cleared buffer"
        );
    }

    /// Release every segment.
    ///
    /// Consumes the buffer, so it cannot be touched afterwards. Dropping the
    /// buffer has the same effect.
    pub fn destroy(self) {
        debug!(
            segments = self.segments.len(),
            allocated = self.allocated(),
            "destroying buffer"
        );
        drop(self);
    }

    /// Number of segments in the chain, including spare ones past the content.
    pub fn segment_count(&self) -> usize { self.segments.len() }

    /// Total capacity reserved across all segments.
    pub fn allocated(&self) -> usize { self.segments.iter().map(Segment::capacity).sum() }

    /// Per-segment layout, in chain order.
    pub fn segments(&self) -> impl Iterator<Item = SegmentInfo> + '_ {
        self.segments
            .iter()
            .enumerate()
            .map(|(index, segment)| SegmentInfo {
                index,
                capacity: segment.capacity(),
                used: segment.used(),
            })
    }

    /// Diagnostic listing of every segment and its written content.
    pub fn dump(&self) -> Dump<'_> { Dump::new(self) }

    pub(crate) fn raw_segments(&self) -> &[Segment] { &self.segments }

    fn logical(&self) -> impl Iterator<Item = &Segment> + '_ {
        self.segments.iter().take_while(|s| s.used() != 0)
    }

    /// Index of the segment the next append starts writing into: advance
    /// while a next segment exists and the current one holds data.
    fn tail_index(&self) -> Option<usize> {
        let last = self.segments.len().checked_sub(1)?;
        let tail = self
            .segments
            .iter()
            .position(|s| s.used() == 0)
            .unwrap_or(last);

        debug_assert!(
            self.segments[tail + 1..].iter().all(|s| s.used() == 0),
            "written segment found past the tail"
        );
        Some(tail)
    }

    fn push_segment(&mut self, overflow: usize) -> Result<()> {
        let capacity = overflow.max(self.config.chunk_size);
        self.segments
            .try_reserve(1)
            .map_err(|_| BufferError::AllocationFailure {
                requested: capacity,
            })?;
        let segment = Segment::allocate(capacity)?;
        self.segments.push(segment);
        trace!(
            index = self.segments.len() - 1,
            capacity, "allocated segment"
        );
        Ok(())
    }
}

impl fmt::Debug for SegmentedBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SegmentedBuffer")
            .field("len", &self.len())
            .field("segments", &self.segments.len())
            .field("allocated", &self.allocated())
            .field("config", &self.config)
            .finish()
    }
}

impl io::Write for SegmentedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.append(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> { Ok(()) }
}
