//! # RingKV
//!
//! The block-storage core of an in-memory key/value cache:
//! - One contiguous, pre-allocated byte region per store
//! - Self-describing frames (header + key + value) written with wraparound
//! - Overwrite-oldest eviction once the region is full
//! - An integer-only index resolving sequences to live byte ranges
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │              Cache facade / shard router                     │
//! │                (outside this crate)                          │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │  put(key, value, now) / get(sequence)
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                    BlockStore                                │
//! │       (one exclusive lock per instance, caller-held)         │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┼────────────┐
//!          │            │            │
//!          ▼            ▼            ▼
//!   ┌───────────┐ ┌───────────┐ ┌───────────┐
//!   │   Frame   │ │   Ring    │ │   Index   │
//!   │  (codec)  │ │ (bytes +  │ │ (seq →    │
//!   │           │ │  cursor)  │ │  range)   │
//!   └───────────┘ └───────────┘ └───────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod frame;
pub mod ring;
pub mod index;
pub mod store;
pub mod shared;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{RingError, Result};
pub use config::Config;
pub use frame::Block;
pub use store::{BlockStore, StoreStats, VerifyReport};
pub use shared::SharedBlockStore;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of RingKV
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
