// Copyright 2024-2026 lowmem Contributors
// SPDX-License-Identifier: Apache-2.0

//! Memory management module for lowmem.
//!
//! Provides the manually managed [`Buffer`], its fixed-width scalar codec,
//! allocation limits, and deep copy.

pub mod codec;
mod buffer;
mod copy;
mod error;
mod limits;

pub use buffer::{new_buffer, Buffer};
pub use codec::Scalar;
pub use copy::copy_buffer;
pub use error::BufferError;
pub use limits::{byte_count, BufferLimits, ALLOCATOR_MAX_BYTES};
