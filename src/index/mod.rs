//! Index Module
//!
//! Maps block sequence numbers to the byte ranges their frames occupy.
//!
//! ## Responsibilities
//! - Record the range of every new frame under its sequence
//! - Drop every entry a new write overlaps, however small the overlap
//! - Resolve a sequence to a live range, or tell stale from never-assigned
//!
//! ## Data Structure Choice
//! Entries live in a `VecDeque` ordered by sequence:
//! - Sequences are recorded strictly increasing, so pushes go to the back
//! - The ring writes in cursor order, so overwritten entries are always the
//!   oldest ones and eviction pops from the front
//! - Lookup is a binary search over the sequence column
//!
//! Only integers are stored; no record bytes live outside the ring.

mod table;

pub use table::{BlockIndex, IndexEntry};

/// Byte range of one frame inside the ring, possibly wrapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockRange {
    /// Start of the frame, in `[0, capacity)`
    pub offset: usize,

    /// Frame length in bytes, in `(0, capacity]`
    pub length: usize,
}

impl BlockRange {
    pub fn new(offset: usize, length: usize) -> Self {
        Self { offset, length }
    }

    /// Position just past the last byte, modulo `capacity`
    pub fn end(&self, capacity: usize) -> usize {
        (self.offset + self.length) % capacity
    }

    /// Split into at most two linear half-open segments inside `[0, capacity)`
    ///
    /// The second segment is empty unless the range wraps.
    pub fn segments(&self, capacity: usize) -> [(usize, usize); 2] {
        let end = self.offset + self.length;
        if end <= capacity {
            [(self.offset, end), (0, 0)]
        } else {
            [(self.offset, capacity), (0, end - capacity)]
        }
    }

    /// Whether two ranges share at least one byte, modulo `capacity`
    pub fn overlaps(&self, other: &BlockRange, capacity: usize) -> bool {
        let ours = self.segments(capacity);
        let theirs = other.segments(capacity);

        ours.iter().any(|&(a_start, a_end)| {
            a_start < a_end
                && theirs
                    .iter()
                    .any(|&(b_start, b_end)| b_start < b_end && a_start < b_end && b_start < a_end)
        })
    }
}
