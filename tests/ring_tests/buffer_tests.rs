//! Tests for the circular store
//!
//! These tests verify:
//! - Construction and capacity validation
//! - Contiguous and wrapping appends
//! - Wrapping reads and range validation
//! - Zero-length and oversized payloads

use ringkv::ring::CircularStore;
use ringkv::RingError;

// =============================================================================
// Construction Tests
// =============================================================================

#[test]
fn test_new_store() {
    let ring = CircularStore::new(32).unwrap();
    assert_eq!(ring.capacity(), 32);
    assert_eq!(ring.head(), 0);
}

#[test]
fn test_zero_capacity_rejected() {
    let result = CircularStore::new(0);
    assert!(matches!(result, Err(RingError::InvalidConfig(_))));
}

// =============================================================================
// Append Tests
// =============================================================================

#[test]
fn test_contiguous_append() {
    let mut ring = CircularStore::new(32).unwrap();

    assert_eq!(ring.append(b"hello").unwrap(), 0);
    assert_eq!(ring.head(), 5);
    assert_eq!(ring.append(b"world").unwrap(), 5);
    assert_eq!(ring.head(), 10);

    assert_eq!(ring.read_at(0, 10).unwrap(), b"helloworld");
}

#[test]
fn test_append_exactly_to_end_resets_head() {
    let mut ring = CircularStore::new(8).unwrap();

    assert_eq!(ring.append(b"abcdefgh").unwrap(), 0);
    assert_eq!(ring.head(), 0);
    assert_eq!(ring.read_at(0, 8).unwrap(), b"abcdefgh");
}

#[test]
fn test_wrapping_append_splits_four_and_six() {
    let mut ring = CircularStore::new(32).unwrap();
    ring.append(&[0xEE; 28]).unwrap();
    assert_eq!(ring.head(), 28);

    let payload = b"0123456789";
    let offset = ring.append(payload).unwrap();

    assert_eq!(offset, 28);
    assert_eq!(ring.head(), 6);
    assert_eq!(ring.read_at(28, 4).unwrap(), b"0123");
    assert_eq!(ring.read_at(0, 6).unwrap(), b"456789");

    // Reads back identically to the same payload on a fresh ring
    let mut fresh = CircularStore::new(32).unwrap();
    let fresh_offset = fresh.append(payload).unwrap();
    assert_eq!(
        ring.read_at(offset, payload.len()).unwrap(),
        fresh.read_at(fresh_offset, payload.len()).unwrap()
    );
}

#[test]
fn test_append_vectored_is_one_payload() {
    let mut ring = CircularStore::new(16).unwrap();
    ring.append(&[0u8; 12]).unwrap();

    let offset = ring.append_vectored(&[&b"ab"[..], &b"cd"[..], &b"efg"[..]]).unwrap();
    assert_eq!(offset, 12);
    assert_eq!(ring.head(), 3);
    assert_eq!(ring.read_at(12, 7).unwrap(), b"abcdefg");
}

#[test]
fn test_full_capacity_payload_from_middle() {
    let mut ring = CircularStore::new(10).unwrap();
    ring.append(b"xyz").unwrap();

    let offset = ring.append(b"0123456789").unwrap();
    assert_eq!(offset, 3);
    assert_eq!(ring.head(), 3);
    assert_eq!(ring.read_at(3, 10).unwrap(), b"0123456789");
}

#[test]
fn test_zero_length_append_is_noop() {
    let mut ring = CircularStore::new(16).unwrap();
    ring.append(b"abc").unwrap();

    assert_eq!(ring.append(b"").unwrap(), 3);
    assert_eq!(ring.append_vectored(&[]).unwrap(), 3);
    assert_eq!(ring.head(), 3);
    assert_eq!(ring.read_at(0, 3).unwrap(), b"abc");
}

#[test]
fn test_oversized_append_rejected_without_mutation() {
    let mut ring = CircularStore::new(8).unwrap();
    ring.append(b"abc").unwrap();

    let result = ring.append(&[1u8; 9]);
    match result {
        Err(RingError::InsufficientSpace { frame_len, limit }) => {
            assert_eq!(frame_len, 9);
            assert_eq!(limit, 8);
        }
        other => panic!("expected InsufficientSpace, got {:?}", other),
    }

    assert_eq!(ring.head(), 3);
    assert_eq!(ring.read_at(0, 3).unwrap(), b"abc");
}

#[test]
fn test_overwrite_after_wrap() {
    let mut ring = CircularStore::new(8).unwrap();
    ring.append(b"AAAAAA").unwrap();
    ring.append(b"BBBB").unwrap();

    // [0, 2) now holds the tail of the second write
    assert_eq!(ring.read_at(0, 2).unwrap(), b"BB");
    assert_eq!(ring.read_at(2, 4).unwrap(), b"AAAA");
}

// =============================================================================
// Read Tests
// =============================================================================

#[test]
fn test_read_out_of_range() {
    let ring = CircularStore::new(16).unwrap();

    assert!(matches!(ring.read_at(16, 1), Err(RingError::OutOfRange { .. })));
    assert!(matches!(ring.read_at(0, 17), Err(RingError::OutOfRange { .. })));
    assert!(ring.read_at(15, 16).is_ok());
}

#[test]
fn test_read_into_wraps() {
    let mut ring = CircularStore::new(8).unwrap();
    ring.append(b"abcdefgh").unwrap();

    let mut out = [0u8; 5];
    ring.read_into(6, &mut out).unwrap();
    assert_eq!(&out, b"ghabc");
}

#[test]
fn test_read_zero_length() {
    let ring = CircularStore::new(8).unwrap();
    assert!(ring.read_at(3, 0).unwrap().is_empty());
}
