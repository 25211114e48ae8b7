use std::fmt;

use crate::SegmentedBuffer;

/// Layout of a single segment as reported by [`SegmentedBuffer::segments`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SegmentInfo {
    pub index:    usize,
    pub capacity: usize,
    pub used:     usize,
}

/// Human-readable listing of a buffer's segments, including spare ones.
///
/// Each segment renders as its index, capacity, used count and written
/// content (lossy UTF-8), followed by a blank line.
///
/// ```
/// use segbuf::SegmentedBuffer;
///
/// let mut buffer = SegmentedBuffer::new();
/// buffer.append(b"hi").unwrap();
///
/// assert_eq!(
///     buffer.dump().to_string(),
///     "chunk 0\nsize 4096\nused 2\ncontent hi\n\n"
/// );
/// ```
pub struct Dump<'a>(&'a SegmentedBuffer);

impl<'a> Dump<'a> {
    pub(crate) fn new(buffer: &'a SegmentedBuffer) -> Self { Self(buffer) }
}

impl fmt::Display for Dump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, segment) in self.0.raw_segments().iter().enumerate() {
            writeln!(f, "chunk {index}")?;
            writeln!(f, "size {}", segment.capacity())?;
            writeln!(f, "used {}", segment.used())?;
            writeln!(f, "content {}", String::from_utf8_lossy(segment.as_slice()))?;
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{BufferConfig, SegmentedBuffer};

    #[test]
    fn test_dump_empty() {
        assert_eq!(SegmentedBuffer::new().dump().to_string(), "");
    }

    #[test]
    fn test_dump_lists_spare_segments() {
        let mut buffer = SegmentedBuffer::with_config(BufferConfig::default().chunk_size(4));
        buffer.append(b"abcdef").unwrap();
        buffer.append(b"gh").unwrap();
        buffer.clear();
        buffer.append(b"xy").unwrap();

        let expected = "chunk 0\nsize 6\nused 2\ncontent xy\n\n\
                        chunk 1\nsize 4\nused 0\ncontent \n\n";
        assert_eq!(buffer.dump().to_string(), expected);
    }

    #[test]
    fn test_segments_layout() {
        let mut buffer = SegmentedBuffer::new();
        buffer.append(b"abc").unwrap();

        let info: Vec<_> = buffer.segments().collect();
        assert_eq!(info.len(), 1);
        assert_eq!(info[0].index, 0);
        assert_eq!(info[0].capacity, 4096);
        assert_eq!(info[0].used, 3);
    }
}
