//! TDD-Light tests for buffer lifecycle and typed access.

use lowmem::memory::{new_buffer, Buffer, BufferError};

fn assert_out_of_bounds<T: std::fmt::Debug>(result: Result<T, BufferError>) {
    assert!(
        matches!(result, Err(BufferError::OutOfBounds { .. })),
        "expected OutOfBounds, got {:?}",
        result
    );
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn new_buffer_has_requested_size() {
    for n in [0usize, 1, 4, 16, 4096] {
        let buffer = new_buffer(n).unwrap();
        assert_eq!(buffer.size(), n);
    }
}

#[test]
fn empty_buffer_rejects_all_access() {
    let mut buffer = new_buffer(0).unwrap();

    assert_out_of_bounds(buffer.read_int(0));
    assert_out_of_bounds(buffer.read_float(0));
    assert_out_of_bounds(buffer.read_double(0));
    assert_out_of_bounds(buffer.read_char(0));
    assert_out_of_bounds(buffer.read_bytes(1, 0));
    assert_out_of_bounds(buffer.write_int(1, 0));
    assert_out_of_bounds(buffer.write_float(1.0, 0));
    assert_out_of_bounds(buffer.write_double(1.0, 0));
    assert_out_of_bounds(buffer.write_char(b'x', 0));
    assert_out_of_bounds(buffer.write_bytes(&[1], 0));
}

#[test]
fn default_is_unallocated() {
    let buffer = Buffer::default();
    assert_eq!(buffer.size(), 0);
    assert!(!buffer.is_allocated());
}

// ============================================================================
// Typed accessors
// ============================================================================

#[test]
#[allow(clippy::approx_constant)]
fn mixed_layout_scenario() {
    let mut buffer = Buffer::new();
    buffer.allocate(16).unwrap();

    buffer.write_int(42, 0).unwrap();
    buffer.write_double(3.14, 4).unwrap();
    buffer.write_char(b'A', 12).unwrap();

    assert_eq!(buffer.read_int(0).unwrap(), 42);
    assert_eq!(buffer.read_double(4).unwrap(), 3.14);
    assert_eq!(buffer.read_char(12).unwrap(), b'A');
    assert_eq!(buffer.read_bytes(4, 0).unwrap(), 42i32.to_ne_bytes().to_vec());
}

#[test]
fn int_round_trip_at_every_offset() {
    let mut buffer = Buffer::with_size(12).unwrap();
    for offset in 0..=8 {
        let value = i32::MIN + offset as i32 * 7919;
        buffer.write_int(value, offset).unwrap();
        assert_eq!(buffer.read_int(offset).unwrap(), value);
    }
    assert_out_of_bounds(buffer.write_int(0, 9));
}

#[test]
fn float_and_double_round_trip_exactly() {
    let mut buffer = Buffer::with_size(12).unwrap();

    buffer.write_float(f32::MIN_POSITIVE, 0).unwrap();
    buffer.write_double(-f64::EPSILON, 4).unwrap();

    assert_eq!(buffer.read_float(0).unwrap(), f32::MIN_POSITIVE);
    assert_eq!(buffer.read_double(4).unwrap(), -f64::EPSILON);
}

#[test]
fn double_nan_keeps_bits() {
    let mut buffer = Buffer::with_size(8).unwrap();
    let nan = f64::from_bits(0x7ff8_0000_dead_beef);

    buffer.write_double(nan, 0).unwrap();

    assert_eq!(buffer.read_double(0).unwrap().to_bits(), nan.to_bits());
}

#[test]
fn char_round_trip_full_byte_range() {
    let mut buffer = Buffer::with_size(256).unwrap();
    for code in 0..=255u8 {
        buffer.write_char(code, code as usize).unwrap();
    }
    for code in 0..=255u8 {
        assert_eq!(buffer.read_char(code as usize).unwrap(), code);
    }
}

#[test]
fn write_bytes_accepts_any_length() {
    let mut buffer = Buffer::with_size(10).unwrap();

    buffer.write_bytes(b"lowmem", 2).unwrap();

    assert_eq!(buffer.read_bytes(6, 2).unwrap(), b"lowmem".to_vec());
    assert_out_of_bounds(buffer.write_bytes(b"overflow", 3));
}

#[test]
fn writes_only_touch_their_window() {
    let mut buffer = Buffer::with_size(8).unwrap();
    buffer.write_bytes(&[0xAA; 8], 0).unwrap();

    buffer.write_int(0, 2).unwrap();

    assert_eq!(
        buffer.read_bytes(8, 0).unwrap(),
        vec![0xAA, 0xAA, 0, 0, 0, 0, 0xAA, 0xAA]
    );
}

#[test]
fn rejected_write_changes_nothing() {
    let mut buffer = Buffer::with_size(6).unwrap();
    buffer.write_bytes(&[1, 2, 3, 4, 5, 6], 0).unwrap();

    assert_out_of_bounds(buffer.write_double(9.0, 0));

    assert_eq!(buffer.read_bytes(6, 0).unwrap(), vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn reads_do_not_mutate() {
    let mut buffer = Buffer::with_size(4).unwrap();
    buffer.write_int(-5, 0).unwrap();

    for _ in 0..3 {
        assert_eq!(buffer.read_int(0).unwrap(), -5);
        assert_eq!(buffer.read_bytes(4, 0).unwrap(), (-5i32).to_ne_bytes().to_vec());
    }
}

// ============================================================================
// Bounds
// ============================================================================

#[test]
fn zero_width_read_at_end_succeeds() {
    let buffer = Buffer::with_size(16).unwrap();

    assert!(buffer.read_bytes(0, 16).unwrap().is_empty());
    assert_out_of_bounds(buffer.read_bytes(1, 16));
}

#[test]
fn out_of_bounds_reports_window() {
    let buffer = Buffer::with_size(16).unwrap();

    let err = buffer.read_double(12).unwrap_err();

    assert_eq!(
        err,
        BufferError::OutOfBounds {
            offset: 12,
            width: 8,
            size: 16
        }
    );
}

#[test]
fn huge_offset_does_not_wrap() {
    let buffer = Buffer::with_size(16).unwrap();
    assert_out_of_bounds(buffer.read_int(usize::MAX - 1));
    assert_out_of_bounds(buffer.read_bytes(usize::MAX, 1));
}

// ============================================================================
// Allocation lifecycle
// ============================================================================

#[test]
fn allocate_replaces_contents() {
    let mut buffer = Buffer::with_size(4).unwrap();
    buffer.write_int(99, 0).unwrap();

    buffer.allocate(8).unwrap();

    assert_eq!(buffer.size(), 8);
    assert_eq!(buffer.read_bytes(8, 0).unwrap(), vec![0; 8]);
}

#[test]
fn allocate_zero_empties_buffer() {
    let mut buffer = Buffer::with_size(4).unwrap();
    buffer.allocate(0).unwrap();
    assert_eq!(buffer.size(), 0);
    assert_out_of_bounds(buffer.read_char(0));
}

#[test]
fn reallocate_grow_preserves_prefix() {
    let pattern: Vec<u8> = (1..=10).collect();
    let mut buffer = Buffer::with_size(10).unwrap();
    buffer.write_bytes(&pattern, 0).unwrap();

    buffer.reallocate(100).unwrap();

    assert_eq!(buffer.size(), 100);
    assert_eq!(buffer.read_bytes(10, 0).unwrap(), pattern);
    buffer.write_int(1, 96).unwrap();
}

#[test]
fn reallocate_shrink_preserves_prefix() {
    let pattern: Vec<u8> = (1..=10).collect();
    let mut buffer = Buffer::with_size(10).unwrap();
    buffer.write_bytes(&pattern, 0).unwrap();

    buffer.reallocate(3).unwrap();

    assert_eq!(buffer.size(), 3);
    assert_eq!(buffer.read_bytes(3, 0).unwrap(), vec![1, 2, 3]);
    assert_out_of_bounds(buffer.read_char(3));
}

#[test]
fn reallocate_unallocated_acts_as_allocate() {
    let mut buffer = Buffer::new();
    buffer.reallocate(12).unwrap();
    assert_eq!(buffer.size(), 12);
    buffer.write_double(1.0, 4).unwrap();
}

#[test]
fn deallocate_blocks_access_and_is_idempotent() {
    let mut buffer = Buffer::with_size(8).unwrap();

    buffer.deallocate();
    buffer.deallocate();

    assert_eq!(buffer.size(), 0);
    assert_out_of_bounds(buffer.read_int(0));
    assert_out_of_bounds(buffer.write_int(0, 0));

    buffer.reallocate(4).unwrap();
    buffer.write_int(3, 0).unwrap();
    assert_eq!(buffer.read_int(0).unwrap(), 3);
}

#[test]
fn view_borrows_current_bytes() {
    let mut buffer = Buffer::with_size(4).unwrap();
    buffer.write_char(b'z', 3).unwrap();

    let view = buffer.view(2, 2).unwrap();

    assert_eq!(view, &[0, b'z']);
}

#[test]
fn buffer_moves_across_threads() {
    let mut buffer = Buffer::with_size(4).unwrap();
    buffer.write_int(11, 0).unwrap();

    let handle = std::thread::spawn(move || buffer.read_int(0).unwrap());

    assert_eq!(handle.join().unwrap(), 11);
}
