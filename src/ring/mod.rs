//! Ring Module
//!
//! Fixed-capacity byte region with a wrapping write cursor.
//!
//! ## Responsibilities
//! - Allocate the whole region once, at construction
//! - Append payloads at the cursor, splitting across the end of the region
//! - Read arbitrary byte ranges back with the same wraparound rule
//!
//! ## Layout
//! ```text
//!   0                      head                      capacity
//!   ├──────────────────────┼──────────────────────────┤
//!   │  newest frames  ...  │  oldest frames (next to  │
//!   │                      │  be overwritten)  ...    │
//!   └──────────────────────┴──────────────────────────┘
//!
//!   wrapped write of N bytes at head = capacity - 4:
//!   [head, capacity) gets 4 bytes, [0, N - 4) gets the rest
//! ```
//!
//! The ring knows nothing about which ranges are live. Reads return whatever
//! bytes are currently stored; callers must confirm liveness with the index
//! before trusting them.

mod buffer;

pub use buffer::CircularStore;
