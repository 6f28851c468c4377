//! Block index implementation
//!
//! Sequence-ordered deque of `(sequence, range)` entries.

use std::collections::VecDeque;

use tracing::trace;

use super::BlockRange;
use crate::error::{Result, RingError};

/// A live index entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexEntry {
    pub sequence: u64,
    pub range: BlockRange,
}

/// Index of live frames in one ring
///
/// `record` only accepts consecutive sequences whose ranges follow each other
/// in ring order, so every recorded sequence in `[first, last]` is either
/// live or was evicted.
pub struct BlockIndex {
    /// Capacity of the ring the ranges refer to
    capacity: usize,

    /// Live entries, ascending by sequence
    entries: VecDeque<IndexEntry>,

    /// First sequence ever recorded
    first_recorded: Option<u64>,

    /// Last sequence ever recorded
    last_recorded: Option<u64>,
}

impl BlockIndex {
    /// Create an empty index for a ring of `capacity` bytes
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::new(),
            first_recorded: None,
            last_recorded: None,
        }
    }

    /// Record the range of a newly written frame
    ///
    /// `sequence` must be exactly one past the last recorded sequence, the
    /// range must be non-empty and fit in the ring, it must start where the
    /// newest live range ends, and it must not overlap a live range (run
    /// `invalidate_overlap` first).
    pub fn record(&mut self, sequence: u64, offset: usize, length: usize) -> Result<()> {
        if let Some(last) = self.last_recorded {
            if sequence <= last {
                return Err(RingError::SequenceRegression {
                    last,
                    got: sequence,
                });
            }
            if sequence != last + 1 {
                return Err(RingError::SequenceGap {
                    expected: last + 1,
                    got: sequence,
                });
            }
        }

        if offset >= self.capacity || length == 0 || length > self.capacity {
            return Err(RingError::OutOfRange {
                offset,
                length,
                capacity: self.capacity,
            });
        }

        if let Some(newest) = self.entries.back() {
            let expected = newest.range.end(self.capacity);
            if offset != expected {
                return Err(RingError::OutOfRingOrder {
                    expected,
                    got: offset,
                });
            }
        }

        // In ring order the oldest entry is the first one a new range reaches
        let range = BlockRange::new(offset, length);
        if let Some(oldest) = self.entries.front() {
            if oldest.range.overlaps(&range, self.capacity) {
                return Err(RingError::OverlapsLive(oldest.sequence));
            }
        }

        self.entries.push_back(IndexEntry { sequence, range });
        self.first_recorded.get_or_insert(sequence);
        self.last_recorded = Some(sequence);

        Ok(())
    }

    /// Drop every entry whose range intersects `[offset, offset + length)`
    ///
    /// Must run before the new frame's own `record`. Returns how many
    /// entries were evicted.
    pub fn invalidate_overlap(&mut self, offset: usize, length: usize) -> usize {
        if length == 0 {
            return 0;
        }

        let incoming = BlockRange::new(offset, length);
        let capacity = self.capacity;

        // `record` keeps ranges in ring order, so a write that starts where
        // the newest frame ends can only clobber the oldest frames.
        let follows_newest = self
            .entries
            .back()
            .map_or(true, |newest| newest.range.end(capacity) == offset);

        if !follows_newest {
            let before = self.entries.len();
            self.entries
                .retain(|entry| !entry.range.overlaps(&incoming, capacity));
            return before - self.entries.len();
        }

        let mut evicted = 0;
        while let Some(oldest) = self.entries.front() {
            if !oldest.range.overlaps(&incoming, capacity) {
                break;
            }
            trace!(sequence = oldest.sequence, "Evicting overlapped block");
            self.entries.pop_front();
            evicted += 1;
        }

        evicted
    }

    /// Resolve a sequence to its live byte range
    ///
    /// - `NotFound` — the sequence was never recorded
    /// - `Stale` — it was recorded, then evicted by an overlapping write
    pub fn lookup(&self, sequence: u64) -> Result<BlockRange> {
        match (self.first_recorded, self.last_recorded) {
            (Some(first), Some(last)) if (first..=last).contains(&sequence) => self
                .entries
                .binary_search_by_key(&sequence, |entry| entry.sequence)
                .map(|position| self.entries[position].range)
                .map_err(|_| RingError::Stale(sequence)),
            _ => Err(RingError::NotFound(sequence)),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Capacity of the ring this index covers
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest live entry (the next one to be overwritten)
    pub fn oldest(&self) -> Option<&IndexEntry> {
        self.entries.front()
    }

    /// First sequence ever recorded
    pub fn first_sequence(&self) -> Option<u64> {
        self.first_recorded
    }

    /// Last sequence ever recorded
    pub fn last_sequence(&self) -> Option<u64> {
        self.last_recorded
    }

    /// Total bytes covered by live entries
    pub fn live_bytes(&self) -> usize {
        self.entries.iter().map(|entry| entry.range.length).sum()
    }

    /// Live entries in ascending sequence order
    pub fn iter(&self) -> impl Iterator<Item = &IndexEntry> + '_ {
        self.entries.iter()
    }
}
