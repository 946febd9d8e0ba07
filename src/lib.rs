// Copyright 2024-2026 lowmem Contributors
// SPDX-License-Identifier: Apache-2.0

//! lowmem
//!
//! Manually managed raw memory buffers for hosts that do not expose pointers.
//! A [`Buffer`] is allocated, resized and freed explicitly, and read or
//! written through typed accessors addressed by byte offset.
//!
//! # Guarantees
//!
//! - **Exclusive**: a buffer is the sole owner of its storage; copies never alias
//! - **Checked**: every access is bounds-checked against the current size
//! - **Atomic**: a rejected allocation or access leaves the buffer unchanged
//! - **Native**: scalars use the host's fixed-width native encodings
//!
//! ```
//! use lowmem::{copy_buffer, Buffer};
//!
//! let mut buffer = Buffer::with_size(16)?;
//! buffer.write_int(42, 0)?;
//! buffer.write_double(0.5, 4)?;
//!
//! let copy = copy_buffer(&buffer)?;
//! assert_eq!(copy.read_int(0)?, 42);
//! assert!(buffer.read_int(14).is_err());
//! # Ok::<(), lowmem::BufferError>(())
//! ```

pub mod cli;
pub mod config;
#[cfg(feature = "ffi")]
pub mod ffi;
pub mod memory;
pub mod selftest;
pub mod telemetry;

pub use memory::{byte_count, copy_buffer, new_buffer, Buffer, BufferError, BufferLimits};
