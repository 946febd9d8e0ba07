//! Fuzz target for deep copy.
//!
//! Copies arbitrary contents and checks the copy is equal and independent.

#![no_main]

use libfuzzer_sys::fuzz_target;
use lowmem::memory::{copy_buffer, Buffer};

fuzz_target!(|data: &[u8]| {
    let mut source = Buffer::with_size(data.len()).unwrap();
    source.write_bytes(data, 0).unwrap();

    let mut copy = copy_buffer(&source).unwrap();
    assert_eq!(copy.size(), source.size());
    assert_eq!(copy.view(0, data.len()).unwrap(), data);

    if !data.is_empty() {
        copy.write_char(data[0].wrapping_add(1), 0).unwrap();
        assert_eq!(source.read_char(0).unwrap(), data[0]);
    }
});
