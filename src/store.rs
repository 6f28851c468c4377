//! Store Module
//!
//! The block store facade that composes codec, ring and index.
//!
//! ## Responsibilities
//! - Assign monotonically increasing sequences to new blocks
//! - Frame blocks straight into the ring (no per-record allocation)
//! - Evict overlapped blocks before a new block becomes visible
//! - Resolve sequences back to blocks, reporting stale and unknown ids

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::config::Config;
use crate::error::{Result, RingError};
use crate::frame::{decode, Block, FrameHeader, HEADER_SIZE};
use crate::index::{BlockIndex, IndexEntry};
use crate::ring::CircularStore;

/// Counters describing a store's activity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    /// Successful puts
    pub puts: u64,

    /// Puts rejected because the frame could not fit
    pub rejected: u64,

    /// Blocks evicted by overlapping writes
    pub evictions: u64,

    /// Frame bytes copied into the ring
    pub bytes_written: u64,

    /// Blocks currently readable
    pub live_blocks: usize,

    /// Ring bytes held by readable blocks
    pub live_bytes: usize,

    /// Ring size in bytes
    pub capacity: usize,
}

/// Outcome of a raw frame walk over the ring
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VerifyReport {
    /// Frames decoded and matching their index entry
    pub frames_verified: u64,

    /// Frames that failed to decode or disagreed with the index
    pub frames_corrupted: u64,

    /// Last sequence whose frame verified cleanly
    pub last_sequence: Option<u64>,

    /// Whether the walk covered every live block and ended at the cursor
    pub consistent: bool,
}

/// Fixed-capacity block store with overwrite-oldest eviction
///
/// ## Concurrency Model
///
/// None inside the store. `put` takes `&mut self`, and a `get` racing with a
/// `put` could read bytes that are being overwritten, so callers must hold a
/// single exclusive lock over both (see [`crate::shared::SharedBlockStore`]).
pub struct BlockStore {
    /// Store configuration
    config: Config,

    /// Byte region holding the frames
    ring: CircularStore,

    /// Sequence → live byte range
    index: BlockIndex,

    /// Sequence handed out by the next successful put
    next_sequence: u64,

    /// Activity counters
    stats: StoreStats,
}

impl BlockStore {
    /// First sequence a store hands out
    pub const FIRST_SEQUENCE: u64 = 1;

    /// Create a store with a ring of `capacity` bytes
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_config(Config::builder().capacity(capacity).build())
    }

    /// Create a store from a full configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;

        let ring = CircularStore::new(config.capacity)?;
        let index = BlockIndex::new(config.capacity);

        debug!(
            capacity = config.capacity,
            frame_limit = config.frame_limit(),
            "Block store created"
        );

        Ok(Self {
            stats: StoreStats {
                capacity: config.capacity,
                ..StoreStats::default()
            },
            config,
            ring,
            index,
            next_sequence: Self::FIRST_SEQUENCE,
        })
    }

    /// Store a block and return its sequence
    ///
    /// Steps:
    /// 1. Build the frame header (rejects oversized frames)
    /// 2. Append header, key and value to the ring
    /// 3. Evict every block the new frame overlaps
    /// 4. Record the new frame under the next sequence
    ///
    /// A rejected put changes nothing: no bytes, no index entries and no
    /// sequence are consumed.
    pub fn put(&mut self, key: &[u8], value: &[u8], now: u64) -> Result<u64> {
        // Step 1: Frame header and admission check
        let header = match FrameHeader::for_block(key, value, now) {
            Ok(header) => header,
            Err(e) => return Err(self.reject(e)),
        };

        let frame_len = header.frame_len();
        let limit = self.config.frame_limit();
        if frame_len > limit {
            return Err(self.reject(RingError::InsufficientSpace { frame_len, limit }));
        }

        // Step 2: Copy the frame into the ring
        let header_bytes = header.to_bytes();
        let offset = self.ring.append_vectored(&[&header_bytes[..], key, value])?;

        // Step 3: Evict overlapped blocks before the new one is visible
        let evicted = self.index.invalidate_overlap(offset, frame_len);
        if evicted > 0 {
            debug!(evicted, offset, frame_len, "Write overlapped older blocks");
        }

        // Step 4: Publish the new block
        let sequence = self.next_sequence;
        self.index.record(sequence, offset, frame_len)?;
        self.next_sequence += 1;

        self.stats.puts += 1;
        self.stats.evictions += evicted as u64;
        self.stats.bytes_written += frame_len as u64;

        trace!(sequence, offset, frame_len, "Block stored");
        Ok(sequence)
    }

    /// Read a block back by sequence
    ///
    /// Returns `Stale` if the block was overwritten, `NotFound` if the
    /// sequence was never handed out, and `CorruptFrame` if the live bytes
    /// do not decode (a bug, not a miss).
    pub fn get(&self, sequence: u64) -> Result<Block> {
        let range = self.index.lookup(sequence)?;
        let frame = self.ring.read_at(range.offset, range.length)?;

        decode(&frame).map_err(|e| {
            warn!(sequence, offset = range.offset, error = %e, "Live block failed to decode");
            e
        })
    }

    /// Read only the value of a block
    pub fn get_value(&self, sequence: u64) -> Result<Vec<u8>> {
        self.get(sequence).map(|block| block.value)
    }

    /// Whether a sequence currently resolves to a live block
    pub fn contains(&self, sequence: u64) -> bool {
        self.index.lookup(sequence).is_ok()
    }

    /// Iterate all live blocks in ascending sequence order
    pub fn blocks(&self) -> impl Iterator<Item = Result<(u64, Block)>> + '_ {
        self.index
            .iter()
            .map(move |entry| self.get(entry.sequence).map(|block| (entry.sequence, block)))
    }

    /// Walk the ring frame by frame and cross-check it against the index
    ///
    /// Starting at the oldest live frame, each next frame boundary is found
    /// from the previous frame's header alone. Stops at the first frame that
    /// fails to decode or disagrees with its index entry.
    pub fn verify(&self) -> VerifyReport {
        let mut report = VerifyReport {
            consistent: true,
            ..VerifyReport::default()
        };

        let Some(oldest) = self.index.oldest() else {
            return report;
        };

        let capacity = self.ring.capacity();
        let mut cursor = oldest.range.offset;

        for entry in self.index.iter() {
            match self.check_frame_at(cursor, entry) {
                Ok(frame_len) => {
                    report.frames_verified += 1;
                    report.last_sequence = Some(entry.sequence);
                    cursor = (cursor + frame_len) % capacity;
                }
                Err(e) => {
                    warn!(sequence = entry.sequence, offset = cursor, error = %e, "Frame walk hit a bad frame");
                    report.frames_corrupted += 1;
                    report.consistent = false;
                    return report;
                }
            }
        }

        if cursor != self.ring.head() {
            warn!(cursor, head = self.ring.head(), "Frame walk did not end at the write cursor");
            report.consistent = false;
        }

        report
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Number of live blocks
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Ring size in bytes
    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    /// Sequence the next successful put will return
    pub fn next_sequence(&self) -> u64 {
        self.next_sequence
    }

    /// Snapshot of the activity counters
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            live_blocks: self.index.len(),
            live_bytes: self.index.live_bytes(),
            ..self.stats.clone()
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn reject(&mut self, error: RingError) -> RingError {
        self.stats.rejected += 1;
        debug!(error = %error, "Put rejected");
        error
    }

    /// Decode the frame at `offset` using its own header for the length,
    /// and check it lines up with `entry`. Returns the frame length.
    fn check_frame_at(&self, offset: usize, entry: &IndexEntry) -> Result<usize> {
        let mut header_bytes = [0u8; HEADER_SIZE];
        self.ring.read_into(offset, &mut header_bytes)?;
        let header = FrameHeader::peek(&header_bytes)?;

        let frame_len = header.frame_len();
        if frame_len > self.ring.capacity() {
            return Err(RingError::CorruptFrame(format!(
                "frame length {} exceeds capacity {}",
                frame_len,
                self.ring.capacity()
            )));
        }

        if offset != entry.range.offset || frame_len != entry.range.length {
            return Err(RingError::CorruptFrame(format!(
                "frame at {} (len {}) disagrees with index entry at {} (len {})",
                offset, frame_len, entry.range.offset, entry.range.length
            )));
        }

        let frame = self.ring.read_at(offset, frame_len)?;
        decode(&frame)?;

        Ok(frame_len)
    }
}
