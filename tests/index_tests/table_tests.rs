//! Tests for the block index
//!
//! These tests verify:
//! - Recording and looking up ranges
//! - Stale vs never-recorded sequences
//! - Overlap invalidation on plain and wrapped ranges
//! - Rejection of regressing sequences and invalid ranges

use ringkv::index::{BlockIndex, BlockRange};
use ringkv::RingError;

// =============================================================================
// Range Overlap Tests
// =============================================================================

#[test]
fn test_segments_plain_and_wrapped() {
    assert_eq!(BlockRange::new(4, 8).segments(32), [(4, 12), (0, 0)]);
    assert_eq!(BlockRange::new(28, 10).segments(32), [(28, 32), (0, 6)]);
    assert_eq!(BlockRange::new(0, 32).segments(32), [(0, 32), (0, 0)]);
}

#[test]
fn test_overlap_plain_ranges() {
    let a = BlockRange::new(0, 10);

    assert!(a.overlaps(&BlockRange::new(9, 5), 32));
    assert!(!a.overlaps(&BlockRange::new(10, 5), 32));
    assert!(BlockRange::new(10, 5).overlaps(&BlockRange::new(12, 1), 32));
}

#[test]
fn test_overlap_wrapped_ranges() {
    let wrapped = BlockRange::new(28, 10); // [28, 32) + [0, 6)

    assert!(wrapped.overlaps(&BlockRange::new(5, 2), 32));
    assert!(wrapped.overlaps(&BlockRange::new(30, 1), 32));
    assert!(!wrapped.overlaps(&BlockRange::new(6, 22), 32));
    assert!(wrapped.overlaps(&BlockRange::new(20, 20), 32));
}

#[test]
fn test_zero_length_never_overlaps() {
    assert!(!BlockRange::new(3, 0).overlaps(&BlockRange::new(0, 32), 32));
}

#[test]
fn test_range_end() {
    assert_eq!(BlockRange::new(4, 8).end(32), 12);
    assert_eq!(BlockRange::new(28, 10).end(32), 6);
    assert_eq!(BlockRange::new(0, 32).end(32), 0);
}

// =============================================================================
// Record / Lookup Tests
// =============================================================================

#[test]
fn test_record_and_lookup() {
    let mut index = BlockIndex::new(64);
    index.record(1, 0, 18).unwrap();
    index.record(2, 18, 20).unwrap();

    assert_eq!(index.lookup(1).unwrap(), BlockRange::new(0, 18));
    assert_eq!(index.lookup(2).unwrap(), BlockRange::new(18, 20));
    assert_eq!(index.len(), 2);
    assert_eq!(index.live_bytes(), 38);
    assert_eq!(index.first_sequence(), Some(1));
    assert_eq!(index.last_sequence(), Some(2));
    assert_eq!(index.capacity(), 64);
}

#[test]
fn test_lookup_on_empty_index() {
    let index = BlockIndex::new(64);
    assert!(index.is_empty());
    assert!(matches!(index.lookup(1), Err(RingError::NotFound(1))));
}

#[test]
fn test_lookup_outside_recorded_window() {
    let mut index = BlockIndex::new(64);
    index.record(5, 0, 10).unwrap();
    index.record(6, 10, 10).unwrap();

    assert!(matches!(index.lookup(4), Err(RingError::NotFound(4))));
    assert!(matches!(index.lookup(7), Err(RingError::NotFound(7))));
}

#[test]
fn test_sequence_regression_rejected() {
    let mut index = BlockIndex::new(64);
    index.record(3, 0, 10).unwrap();

    assert!(matches!(
        index.record(3, 10, 10),
        Err(RingError::SequenceRegression { last: 3, got: 3 })
    ));
    assert!(matches!(
        index.record(2, 10, 10),
        Err(RingError::SequenceRegression { last: 3, got: 2 })
    ));
    assert_eq!(index.len(), 1);
}

#[test]
fn test_skipped_sequence_rejected() {
    let mut index = BlockIndex::new(64);
    index.record(1, 0, 10).unwrap();

    assert!(matches!(
        index.record(5, 10, 10),
        Err(RingError::SequenceGap { expected: 2, got: 5 })
    ));

    // Nothing past 1 was recorded, so these were never assigned
    assert!(matches!(index.lookup(3), Err(RingError::NotFound(3))));
    assert!(matches!(index.lookup(5), Err(RingError::NotFound(5))));
    assert_eq!(index.last_sequence(), Some(1));
}

#[test]
fn test_out_of_ring_order_range_rejected() {
    let mut index = BlockIndex::new(64);
    index.record(1, 0, 5).unwrap();

    // Must start where [0, 5) ends
    assert!(matches!(
        index.record(2, 20, 5),
        Err(RingError::OutOfRingOrder { expected: 5, got: 20 })
    ));
    assert_eq!(index.len(), 1);

    index.record(2, 5, 5).unwrap();
    index.record(3, 10, 5).unwrap();

    // The next write at the cursor leaves no overlapped entry behind
    let incoming = BlockRange::new(15, 6);
    assert_eq!(index.invalidate_overlap(15, 6), 0);
    assert!(index.iter().all(|entry| !entry.range.overlaps(&incoming, 64)));
}

#[test]
fn test_range_overlapping_live_entry_rejected() {
    let mut index = BlockIndex::new(32);
    index.record(1, 0, 10).unwrap();

    // [10, 32) + [0, 8) reaches back into entry 1
    assert!(matches!(index.record(2, 10, 30), Err(RingError::OverlapsLive(1))));
    assert_eq!(index.len(), 1);

    // Once the overlap is invalidated the same range is accepted
    assert_eq!(index.invalidate_overlap(10, 30), 1);
    index.record(2, 10, 30).unwrap();
    assert!(matches!(index.lookup(1), Err(RingError::Stale(1))));
}

#[test]
fn test_invalid_ranges_rejected() {
    let mut index = BlockIndex::new(32);

    assert!(matches!(index.record(1, 32, 1), Err(RingError::OutOfRange { .. })));
    assert!(matches!(index.record(1, 0, 0), Err(RingError::OutOfRange { .. })));
    assert!(matches!(index.record(1, 0, 33), Err(RingError::OutOfRange { .. })));
    assert!(index.record(1, 31, 32).is_ok());
}

// =============================================================================
// Invalidation Tests
// =============================================================================

#[test]
fn test_wrapping_write_evicts_overlapped_entry() {
    let mut index = BlockIndex::new(32);
    index.record(1, 0, 18).unwrap();

    // [18, 32) + [0, 6) clips the head of entry 1
    let evicted = index.invalidate_overlap(18, 20);
    index.record(2, 18, 20).unwrap();

    assert_eq!(evicted, 1);
    assert!(matches!(index.lookup(1), Err(RingError::Stale(1))));
    assert_eq!(index.lookup(2).unwrap(), BlockRange::new(18, 20));
}

#[test]
fn test_one_byte_overlap_evicts_whole_entry() {
    let mut index = BlockIndex::new(32);
    index.record(1, 0, 10).unwrap();
    index.record(2, 10, 10).unwrap();
    index.record(3, 20, 10).unwrap();

    // [30, 32) + [0, 1) touches a single byte of entry 1
    assert_eq!(index.invalidate_overlap(30, 3), 1);
    assert!(matches!(index.lookup(1), Err(RingError::Stale(1))));
    assert!(index.lookup(2).is_ok());
    assert!(index.lookup(3).is_ok());
}

#[test]
fn test_non_overlapping_write_evicts_nothing() {
    let mut index = BlockIndex::new(32);
    index.record(1, 0, 10).unwrap();

    assert_eq!(index.invalidate_overlap(10, 10), 0);
    assert_eq!(index.invalidate_overlap(10, 0), 0);
    assert_eq!(index.len(), 1);
}

#[test]
fn test_large_write_evicts_several_entries() {
    let mut index = BlockIndex::new(32);
    index.record(1, 0, 8).unwrap();
    index.record(2, 8, 8).unwrap();
    index.record(3, 16, 8).unwrap();
    index.record(4, 24, 4).unwrap();

    // [28, 32) + [0, 12): entries 1 and 2
    assert_eq!(index.invalidate_overlap(28, 16), 2);
    assert_eq!(index.oldest().map(|entry| entry.sequence), Some(3));
    assert!(matches!(index.lookup(1), Err(RingError::Stale(1))));
    assert!(matches!(index.lookup(2), Err(RingError::Stale(2))));
}

#[test]
fn test_invalidation_away_from_cursor_scans_all_entries() {
    let mut index = BlockIndex::new(64);
    index.record(1, 0, 10).unwrap();
    index.record(2, 10, 10).unwrap();
    index.record(3, 20, 10).unwrap();

    // Not at the cursor (30): only the middle entry is hit
    assert_eq!(index.invalidate_overlap(12, 2), 1);
    assert!(index.lookup(1).is_ok());
    assert!(matches!(index.lookup(2), Err(RingError::Stale(2))));
    assert!(index.lookup(3).is_ok());
}

#[test]
fn test_iter_in_sequence_order() {
    let mut index = BlockIndex::new(64);
    for (i, offset) in [0usize, 16, 32].iter().enumerate() {
        index.record(i as u64 + 1, *offset, 16).unwrap();
    }

    let sequences: Vec<u64> = index.iter().map(|entry| entry.sequence).collect();
    assert_eq!(sequences, vec![1, 2, 3]);
}
