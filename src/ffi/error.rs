// Copyright 2024-2026 lowmem Contributors
// SPDX-License-Identifier: Apache-2.0

//! FFI error codes and thread-local last-error message.

use std::cell::RefCell;
use std::ffi::{c_char, CString};
use std::ptr;

use crate::memory::BufferError;

/// Result code returned by every fallible FFI function.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LowmemErrorCode {
    Ok = 0,
    NullPointer = -1,
    InvalidSize = -2,
    AllocationFailure = -3,
    OutOfBounds = -4,
    Internal = -99,
}

thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

/// Record `msg` as this thread's last error.
pub fn set_last_error(msg: impl Into<String>) {
    let msg = msg.into().replace('\0', " ");
    LAST_ERROR.with(|slot| *slot.borrow_mut() = CString::new(msg).ok());
}

pub(crate) fn null_pointer() -> LowmemErrorCode {
    set_last_error("null pointer argument");
    LowmemErrorCode::NullPointer
}

impl From<BufferError> for LowmemErrorCode {
    fn from(err: BufferError) -> Self {
        set_last_error(err.to_string());
        match err {
            BufferError::InvalidSize { .. } => Self::InvalidSize,
            BufferError::AllocationFailure { .. } => Self::AllocationFailure,
            BufferError::OutOfBounds { .. } => Self::OutOfBounds,
        }
    }
}

/// Last error message on this thread, or null.
///
/// The pointer stays valid until the next failing call or
/// [`lowmem_clear_last_error`] on the same thread.
#[no_mangle]
pub extern "C" fn lowmem_get_last_error() -> *const c_char {
    LAST_ERROR.with(|slot| {
        slot.borrow()
            .as_ref()
            .map_or(ptr::null(), |msg| msg.as_ptr())
    })
}

#[no_mangle]
pub extern "C" fn lowmem_clear_last_error() {
    LAST_ERROR.with(|slot| *slot.borrow_mut() = None);
}
