//! Error types for RingKV
//!
//! Provides a unified error type for all block store operations.

use thiserror::Error;

/// Result type alias using RingError
pub type Result<T> = std::result::Result<T, RingError>;

/// Unified error type for RingKV operations
#[derive(Debug, Error)]
pub enum RingError {
    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    InvalidConfig(String),

    // -------------------------------------------------------------------------
    // Write Errors
    // -------------------------------------------------------------------------
    /// The frame can never fit in this store; retrying unmodified is pointless
    #[error("Insufficient space: frame of {frame_len} bytes exceeds limit of {limit} bytes")]
    InsufficientSpace { frame_len: usize, limit: usize },

    #[error("Sequence regression: {got} is not greater than last recorded {last}")]
    SequenceRegression { last: u64, got: u64 },

    #[error("Sequence gap: expected {expected}, got {got}")]
    SequenceGap { expected: u64, got: u64 },

    #[error("Range out of ring order: expected offset {expected}, got {got}")]
    OutOfRingOrder { expected: usize, got: usize },

    #[error("Range overlaps live block {0}")]
    OverlapsLive(u64),

    // -------------------------------------------------------------------------
    // Byte Range Errors
    // -------------------------------------------------------------------------
    #[error("Range out of bounds: offset {offset}, length {length}, capacity {capacity}")]
    OutOfRange {
        offset: usize,
        length: usize,
        capacity: usize,
    },

    // -------------------------------------------------------------------------
    // Read Errors
    // -------------------------------------------------------------------------
    /// The block existed but its bytes were overwritten by a later write
    #[error("Block {0} is stale (evicted by a later write)")]
    Stale(u64),

    #[error("Block {0} was never assigned")]
    NotFound(u64),

    #[error("Corrupt frame: {0}")]
    CorruptFrame(String),

    // -------------------------------------------------------------------------
    // I/O Errors (CLI only)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RingError {
    /// Whether this error is an ordinary cache miss (eviction or unknown id)
    /// rather than a fault.
    pub fn is_miss(&self) -> bool {
        matches!(self, RingError::Stale(_) | RingError::NotFound(_))
    }
}
