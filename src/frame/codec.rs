//! Frame codec
//!
//! Encoding and decoding functions for block frames.

use bytes::{Buf, BufMut};

use super::Block;
use crate::error::{Result, RingError};

/// Header size: payload_len (4) + created_at (8) + key_len (4)
pub const HEADER_SIZE: usize = 16;

/// Total frame length for a key/value pair
pub fn frame_len(key: &[u8], value: &[u8]) -> usize {
    HEADER_SIZE + key.len() + value.len()
}

// =============================================================================
// Frame Header
// =============================================================================

/// Fixed-width header at the start of every frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    /// Key + value bytes following the header
    pub payload_len: u32,

    /// Creation time (unix millis)
    pub created_at: u64,

    /// Key bytes following the header
    pub key_len: u32,
}

impl FrameHeader {
    /// Build the header for a key/value pair
    ///
    /// Fails with `InsufficientSpace` if the payload length does not fit
    /// in the 32-bit length field.
    pub fn for_block(key: &[u8], value: &[u8], created_at: u64) -> Result<Self> {
        let payload = key.len() + value.len();
        let payload_len = u32::try_from(payload).map_err(|_| RingError::InsufficientSpace {
            frame_len: HEADER_SIZE.saturating_add(payload),
            limit: HEADER_SIZE.saturating_add(u32::MAX as usize),
        })?;

        // key_len <= payload_len, so this cannot truncate
        let key_len = key.len() as u32;

        Ok(Self {
            payload_len,
            created_at,
            key_len,
        })
    }

    /// Serialize the header into its fixed-width byte form
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        let mut cursor = &mut out[..];
        cursor.put_u32_le(self.payload_len);
        cursor.put_u64_le(self.created_at);
        cursor.put_u32_le(self.key_len);
        out
    }

    /// Parse a header from the first `HEADER_SIZE` bytes of `bytes`
    ///
    /// Only the header is inspected; trailing bytes are ignored. Used to
    /// find frame boundaries when walking raw ring bytes.
    pub fn peek(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(RingError::CorruptFrame(format!(
                "incomplete header: expected {} bytes, got {}",
                HEADER_SIZE,
                bytes.len()
            )));
        }

        let mut buf = &bytes[..HEADER_SIZE];
        let header = Self {
            payload_len: buf.get_u32_le(),
            created_at: buf.get_u64_le(),
            key_len: buf.get_u32_le(),
        };

        if header.key_len > header.payload_len {
            return Err(RingError::CorruptFrame(format!(
                "key length {} exceeds payload length {}",
                header.key_len, header.payload_len
            )));
        }

        Ok(header)
    }

    /// Length of the whole frame this header describes
    pub fn frame_len(&self) -> usize {
        HEADER_SIZE + self.payload_len as usize
    }

    /// Length of the value section
    pub fn value_len(&self) -> usize {
        self.payload_len.saturating_sub(self.key_len) as usize
    }
}

// =============================================================================
// Encoding / Decoding
// =============================================================================

/// Encode a block into a freshly allocated frame
///
/// Format: header (16) + key + value
pub fn encode(key: &[u8], value: &[u8], created_at: u64) -> Result<Vec<u8>> {
    let header = FrameHeader::for_block(key, value, created_at)?;

    let mut frame = Vec::with_capacity(header.frame_len());
    frame.put_slice(&header.to_bytes());
    frame.put_slice(key);
    frame.put_slice(value);

    Ok(frame)
}

/// Decode a complete frame
///
/// The buffer must contain exactly one frame: the header's declared
/// lengths have to account for every trailing byte.
pub fn decode(bytes: &[u8]) -> Result<Block> {
    let header = FrameHeader::peek(bytes)?;

    let body = &bytes[HEADER_SIZE..];
    if body.len() != header.payload_len as usize {
        return Err(RingError::CorruptFrame(format!(
            "payload length mismatch: header declares {}, got {}",
            header.payload_len,
            body.len()
        )));
    }

    let (key, value) = body.split_at(header.key_len as usize);

    Ok(Block {
        key: key.to_vec(),
        value: value.to_vec(),
        created_at: header.created_at,
    })
}
