use crate::{BufferError, Result};

/// One allocation unit of a [`SegmentedBuffer`](crate::SegmentedBuffer).
///
/// `data.len()` is the written prefix; `capacity` is what was reserved at
/// allocation time and never changes afterwards.
pub(crate) struct Segment {
    data:     Vec<u8>,
    capacity: usize,
}

impl Segment {
    /// Reserve exactly `capacity` bytes, reporting failure instead of aborting.
    pub(crate) fn allocate(capacity: usize) -> Result<Self> {
        let mut data = Vec::new();
        data.try_reserve_exact(capacity)
            .map_err(|_| BufferError::AllocationFailure {
                requested: capacity,
            })?;
        Ok(Self { data, capacity })
    }

    pub(crate) fn capacity(&self) -> usize { self.capacity }

    pub(crate) fn used(&self) -> usize { self.data.len() }

    pub(crate) fn remaining(&self) -> usize { self.capacity - self.data.len() }

    pub(crate) fn as_slice(&self) -> &[u8] { &self.data }

    /// Copy as much of `bytes` as fits, returning how many bytes were taken.
    pub(crate) fn write(&mut self, bytes: &[u8]) -> usize {
        let n = bytes.len().min(self.remaining());
        // stays within the reserved capacity, so this never reallocates
        self.data.extend_from_slice(&bytes[..n]);
        n
    }

    pub(crate) fn clear(&mut self) { self.data.clear(); }
}
