//! Fuzz target for arbitrary buffer operation sequences.
//!
//! Replays random allocate/reallocate/deallocate/read/write calls against a
//! buffer and a plain `Vec<u8>` model. No sequence may panic, and the buffer
//! must always agree with the model on size and contents.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use lowmem::memory::{Buffer, BufferLimits};

const MAX_BYTES: usize = 1 << 16;

#[derive(Debug, Arbitrary)]
enum Op {
    Allocate(u16),
    Reallocate(u32),
    Deallocate,
    WriteInt(i32, u16),
    WriteDouble(f64, u16),
    WriteChar(u8, u16),
    WriteBytes(Vec<u8>, u16),
    ReadInt(u16),
    ReadBytes(u16, u16),
}

fn in_bounds(offset: usize, width: usize, size: usize) -> bool {
    offset + width <= size
}

fuzz_target!(|ops: Vec<Op>| {
    let mut buffer = Buffer::empty(BufferLimits::new(MAX_BYTES));
    let mut model: Vec<u8> = Vec::new();

    for op in ops {
        match op {
            Op::Allocate(n) => {
                let n = n as usize;
                buffer.allocate(n).unwrap();
                model = vec![0; n];
            }
            Op::Reallocate(n) => {
                let n = n as usize;
                let result = buffer.reallocate(n);
                if n > MAX_BYTES {
                    assert!(result.unwrap_err().is_allocation());
                } else {
                    result.unwrap();
                    model.resize(n, 0);
                }
            }
            Op::Deallocate => {
                buffer.deallocate();
                model.clear();
            }
            Op::WriteInt(v, off) => {
                let off = off as usize;
                let ok = buffer.write_int(v, off).is_ok();
                assert_eq!(ok, in_bounds(off, 4, model.len()));
                if ok {
                    model[off..off + 4].copy_from_slice(&v.to_ne_bytes());
                }
            }
            Op::WriteDouble(v, off) => {
                let off = off as usize;
                let ok = buffer.write_double(v, off).is_ok();
                assert_eq!(ok, in_bounds(off, 8, model.len()));
                if ok {
                    model[off..off + 8].copy_from_slice(&v.to_ne_bytes());
                }
            }
            Op::WriteChar(v, off) => {
                let off = off as usize;
                let ok = buffer.write_char(v, off).is_ok();
                assert_eq!(ok, in_bounds(off, 1, model.len()));
                if ok {
                    model[off] = v;
                }
            }
            Op::WriteBytes(data, off) => {
                let off = off as usize;
                let ok = buffer.write_bytes(&data, off).is_ok();
                assert_eq!(ok, in_bounds(off, data.len(), model.len()));
                if ok {
                    model[off..off + data.len()].copy_from_slice(&data);
                }
            }
            Op::ReadInt(off) => {
                let off = off as usize;
                match buffer.read_int(off) {
                    Ok(v) => assert_eq!(&v.to_ne_bytes()[..], &model[off..off + 4]),
                    Err(e) => {
                        assert!(e.is_bounds());
                        assert!(!in_bounds(off, 4, model.len()));
                    }
                }
            }
            Op::ReadBytes(amount, off) => {
                let (amount, off) = (amount as usize, off as usize);
                match buffer.read_bytes(amount, off) {
                    Ok(bytes) => assert_eq!(&bytes[..], &model[off..off + amount]),
                    Err(e) => {
                        assert!(e.is_bounds());
                        assert!(!in_bounds(off, amount, model.len()));
                    }
                }
            }
        }
        assert_eq!(buffer.size(), model.len());
    }

    assert_eq!(buffer.view(0, model.len()).unwrap(), &model[..]);
});
