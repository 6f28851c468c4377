//! Frame Module
//!
//! Self-describing byte encoding of a single block (key, value, timestamp).
//!
//! ## Responsibilities
//! - Encode a block into a frame that can be copied into the ring
//! - Decode a frame read back from the ring, rejecting inconsistent headers
//! - Let a maintenance pass walk raw ring bytes using headers alone
//!
//! ## Frame Format
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ Header (16 bytes, little-endian)                         │
//! │ ┌──────────────────┬────────────────────┬──────────────┐ │
//! │ │ PayloadLen u32(4)│ CreatedAt u64 (8)  │ KeyLen u32(4)│ │
//! │ └──────────────────┴────────────────────┴──────────────┘ │
//! ├──────────────────────────────────────────────────────────┤
//! │ Key (KeyLen bytes)                                       │
//! ├──────────────────────────────────────────────────────────┤
//! │ Value (PayloadLen - KeyLen bytes)                        │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! `PayloadLen` counts key + value bytes, never the header itself.

mod codec;

pub use codec::{decode, encode, frame_len, FrameHeader, HEADER_SIZE};

/// A logical record stored in the ring
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Opaque key bytes
    pub key: Vec<u8>,

    /// Opaque value bytes
    pub value: Vec<u8>,

    /// Creation time (unix millis), supplied by the caller on put
    pub created_at: u64,
}

impl Block {
    pub fn new(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>, created_at: u64) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            created_at,
        }
    }

    /// Size of this block once framed
    pub fn frame_len(&self) -> usize {
        frame_len(&self.key, &self.value)
    }
}
