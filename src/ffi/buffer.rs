// Copyright 2024-2026 lowmem Contributors
// SPDX-License-Identifier: Apache-2.0

//! Buffer lifecycle and accessor functions for FFI.

use std::ffi::c_char;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::ptr;
use std::sync::OnceLock;

use super::error::{null_pointer, set_last_error, LowmemErrorCode};
use crate::config;
use crate::memory::{byte_count, copy_buffer, Buffer, BufferLimits, Scalar};

/// Limits applied to buffers created through FFI, loaded once from config.
fn host_limits() -> BufferLimits {
    static LIMITS: OnceLock<BufferLimits> = OnceLock::new();
    *LIMITS.get_or_init(|| config::load().limits)
}

/// Run `f`, converting its error or a panic into a result code.
fn guarded<F>(f: F) -> LowmemErrorCode
where
    F: FnOnce() -> Result<(), LowmemErrorCode>,
{
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(())) => LowmemErrorCode::Ok,
        Ok(Err(code)) => code,
        Err(_) => {
            set_last_error("internal panic in lowmem");
            LowmemErrorCode::Internal
        }
    }
}

fn host_offset(offset: i64) -> Result<usize, LowmemErrorCode> {
    usize::try_from(offset).map_err(|_| {
        set_last_error(format!("Memory access out of bounds: offset {}", offset));
        LowmemErrorCode::OutOfBounds
    })
}

unsafe fn read_scalar<T: Scalar>(
    buffer: *const Buffer,
    offset: i64,
    out_value: *mut T,
) -> LowmemErrorCode {
    if buffer.is_null() || out_value.is_null() {
        return null_pointer();
    }
    guarded(|| {
        let value = (*buffer).read::<T>(host_offset(offset)?)?;
        *out_value = value;
        Ok(())
    })
}

unsafe fn write_scalar<T: Scalar>(buffer: *mut Buffer, value: T, offset: i64) -> LowmemErrorCode {
    if buffer.is_null() {
        return null_pointer();
    }
    guarded(|| {
        (*buffer).write(value, host_offset(offset)?)?;
        Ok(())
    })
}

// ============================================================================
// Lifecycle
// ============================================================================

/// Create a buffer of `bytes` bytes (0 for unallocated).
#[no_mangle]
pub unsafe extern "C" fn lowmem_buffer_new(
    bytes: i64,
    out_buffer: *mut *mut Buffer,
) -> LowmemErrorCode {
    if out_buffer.is_null() {
        return null_pointer();
    }
    guarded(|| {
        let buffer = Buffer::with_limits(byte_count(bytes)?, host_limits())?;
        *out_buffer = Box::into_raw(Box::new(buffer));
        Ok(())
    })
}

/// Destroy a buffer and release its storage. Null is a no-op.
#[no_mangle]
pub unsafe extern "C" fn lowmem_buffer_free(buffer: *mut Buffer) {
    if !buffer.is_null() {
        drop(Box::from_raw(buffer));
    }
}

#[no_mangle]
pub unsafe extern "C" fn lowmem_buffer_allocate(buffer: *mut Buffer, bytes: i64) -> LowmemErrorCode {
    if buffer.is_null() {
        return null_pointer();
    }
    guarded(|| {
        (*buffer).allocate(byte_count(bytes)?)?;
        Ok(())
    })
}

#[no_mangle]
pub unsafe extern "C" fn lowmem_buffer_reallocate(
    buffer: *mut Buffer,
    bytes: i64,
) -> LowmemErrorCode {
    if buffer.is_null() {
        return null_pointer();
    }
    guarded(|| {
        (*buffer).reallocate(byte_count(bytes)?)?;
        Ok(())
    })
}

#[no_mangle]
pub unsafe extern "C" fn lowmem_buffer_deallocate(buffer: *mut Buffer) -> LowmemErrorCode {
    if buffer.is_null() {
        return null_pointer();
    }
    guarded(|| {
        (*buffer).deallocate();
        Ok(())
    })
}

#[no_mangle]
pub unsafe extern "C" fn lowmem_buffer_size(
    buffer: *const Buffer,
    out_size: *mut u64,
) -> LowmemErrorCode {
    if buffer.is_null() || out_size.is_null() {
        return null_pointer();
    }
    *out_size = (*buffer).size() as u64;
    LowmemErrorCode::Ok
}

/// Deep-copy `source` into a new buffer written to `out_buffer`.
#[no_mangle]
pub unsafe extern "C" fn lowmem_buffer_copy(
    source: *const Buffer,
    out_buffer: *mut *mut Buffer,
) -> LowmemErrorCode {
    if source.is_null() || out_buffer.is_null() {
        return null_pointer();
    }
    guarded(|| {
        let copy = copy_buffer(&*source)?;
        *out_buffer = Box::into_raw(Box::new(copy));
        Ok(())
    })
}

// ============================================================================
// Writers
// ============================================================================

#[no_mangle]
pub unsafe extern "C" fn lowmem_buffer_write_int(
    buffer: *mut Buffer,
    value: i32,
    offset: i64,
) -> LowmemErrorCode {
    write_scalar(buffer, value, offset)
}

#[no_mangle]
pub unsafe extern "C" fn lowmem_buffer_write_float(
    buffer: *mut Buffer,
    value: f32,
    offset: i64,
) -> LowmemErrorCode {
    write_scalar(buffer, value, offset)
}

#[no_mangle]
pub unsafe extern "C" fn lowmem_buffer_write_double(
    buffer: *mut Buffer,
    value: f64,
    offset: i64,
) -> LowmemErrorCode {
    write_scalar(buffer, value, offset)
}

#[no_mangle]
pub unsafe extern "C" fn lowmem_buffer_write_char(
    buffer: *mut Buffer,
    value: c_char,
    offset: i64,
) -> LowmemErrorCode {
    write_scalar(buffer, value as u8, offset)
}

/// Copy `len` bytes from `data` into the buffer at `offset`.
///
/// `data` may be null only when `len` is 0.
#[no_mangle]
pub unsafe extern "C" fn lowmem_buffer_write_bytes(
    buffer: *mut Buffer,
    data: *const u8,
    len: usize,
    offset: i64,
) -> LowmemErrorCode {
    if buffer.is_null() || (data.is_null() && len > 0) {
        return null_pointer();
    }
    guarded(|| {
        let value: &[u8] = if len == 0 {
            &[]
        } else {
            std::slice::from_raw_parts(data, len)
        };
        (*buffer).write_bytes(value, host_offset(offset)?)?;
        Ok(())
    })
}

// ============================================================================
// Readers
// ============================================================================

#[no_mangle]
pub unsafe extern "C" fn lowmem_buffer_read_int(
    buffer: *const Buffer,
    offset: i64,
    out_value: *mut i32,
) -> LowmemErrorCode {
    read_scalar(buffer, offset, out_value)
}

#[no_mangle]
pub unsafe extern "C" fn lowmem_buffer_read_float(
    buffer: *const Buffer,
    offset: i64,
    out_value: *mut f32,
) -> LowmemErrorCode {
    read_scalar(buffer, offset, out_value)
}

#[no_mangle]
pub unsafe extern "C" fn lowmem_buffer_read_double(
    buffer: *const Buffer,
    offset: i64,
    out_value: *mut f64,
) -> LowmemErrorCode {
    read_scalar(buffer, offset, out_value)
}

#[no_mangle]
pub unsafe extern "C" fn lowmem_buffer_read_char(
    buffer: *const Buffer,
    offset: i64,
    out_value: *mut c_char,
) -> LowmemErrorCode {
    if buffer.is_null() || out_value.is_null() {
        return null_pointer();
    }
    guarded(|| {
        let value = (*buffer).read_char(host_offset(offset)?)?;
        *out_value = value as c_char;
        Ok(())
    })
}

/// Copy `amount` bytes at `offset` into `out_data`, which must hold at
/// least `amount` bytes. `out_data` may be null only when `amount` is 0.
#[no_mangle]
pub unsafe extern "C" fn lowmem_buffer_read_bytes(
    buffer: *const Buffer,
    amount: i64,
    offset: i64,
    out_data: *mut u8,
) -> LowmemErrorCode {
    if buffer.is_null() || (out_data.is_null() && amount > 0) {
        return null_pointer();
    }
    guarded(|| {
        let amount = byte_count(amount)?;
        let bytes = (*buffer).view(host_offset(offset)?, amount)?;
        if !bytes.is_empty() {
            ptr::copy_nonoverlapping(bytes.as_ptr(), out_data, bytes.len());
        }
        Ok(())
    })
}
