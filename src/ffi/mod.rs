// Copyright 2024-2026 lowmem Contributors
// SPDX-License-Identifier: Apache-2.0

//! C FFI for lowmem buffers.
//!
//! This is the fixed host boundary. Sizes and offsets cross it as signed
//! 64-bit integers so negative values from the host are caught: a negative
//! size is `InvalidSize`, a negative offset is `OutOfBounds`. Buffers handed
//! out by [`lowmem_buffer_new`] and [`lowmem_buffer_copy`] must be released
//! with [`lowmem_buffer_free`].

mod buffer;
mod error;

pub use buffer::*;
pub use error::{lowmem_clear_last_error, lowmem_get_last_error, set_last_error, LowmemErrorCode};
