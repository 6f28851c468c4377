//! Circular store implementation
//!
//! Single pre-allocated byte buffer plus a write cursor.

use crate::error::{Result, RingError};

/// Fixed-size byte region written with wraparound
///
/// No synchronization: a store is owned by exactly one mutator at a time.
pub struct CircularStore {
    /// The region itself, allocated once in `new`
    buffer: Box<[u8]>,

    /// Next byte to be written, always in `[0, capacity)`
    head: usize,
}

impl CircularStore {
    /// Allocate a zeroed region of exactly `capacity` bytes
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(RingError::InvalidConfig(
                "ring capacity must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            buffer: vec![0u8; capacity].into_boxed_slice(),
            head: 0,
        })
    }

    /// Size of the region in bytes
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Position the next append will start at
    pub fn head(&self) -> usize {
        self.head
    }

    /// Append a payload at the cursor, wrapping if needed
    ///
    /// Returns the offset the payload starts at (the cursor before the write).
    pub fn append(&mut self, payload: &[u8]) -> Result<usize> {
        self.append_vectored(&[payload])
    }

    /// Append several slices as one logically contiguous payload
    ///
    /// Nothing is written unless the combined length fits in the region.
    /// A zero-length payload is a no-op that returns the current cursor.
    pub fn append_vectored(&mut self, parts: &[&[u8]]) -> Result<usize> {
        let total: usize = parts.iter().map(|part| part.len()).sum();
        let capacity = self.capacity();

        if total > capacity {
            return Err(RingError::InsufficientSpace {
                frame_len: total,
                limit: capacity,
            });
        }

        let offset = self.head;
        if total == 0 {
            return Ok(offset);
        }

        let mut position = offset;
        for part in parts {
            self.write_wrapping(position, part);
            position = (position + part.len()) % capacity;
        }

        self.head = position;
        Ok(offset)
    }

    /// Read `length` bytes starting at `offset`, wrapping if needed
    pub fn read_at(&self, offset: usize, length: usize) -> Result<Vec<u8>> {
        let mut out = vec![0u8; length];
        self.read_into(offset, &mut out)?;
        Ok(out)
    }

    /// Fill `out` with the bytes starting at `offset`, wrapping if needed
    pub fn read_into(&self, offset: usize, out: &mut [u8]) -> Result<()> {
        let capacity = self.capacity();
        let length = out.len();

        if offset >= capacity || length > capacity {
            return Err(RingError::OutOfRange {
                offset,
                length,
                capacity,
            });
        }

        let first = length.min(capacity - offset);
        out[..first].copy_from_slice(&self.buffer[offset..offset + first]);

        let rest = length - first;
        if rest > 0 {
            out[first..].copy_from_slice(&self.buffer[..rest]);
        }

        Ok(())
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Copy `data` to `[position, position + len)` mod capacity
    ///
    /// Caller guarantees `position < capacity` and `data.len() <= capacity`.
    fn write_wrapping(&mut self, position: usize, data: &[u8]) {
        let capacity = self.capacity();
        let first = data.len().min(capacity - position);
        self.buffer[position..position + first].copy_from_slice(&data[..first]);

        let rest = data.len() - first;
        if rest > 0 {
            self.buffer[..rest].copy_from_slice(&data[first..]);
        }
    }

    /// Raw access to the region, for corruption tests
    #[cfg(test)]
    pub(crate) fn region_mut(&mut self) -> &mut [u8] {
        &mut self.buffer
    }
}
