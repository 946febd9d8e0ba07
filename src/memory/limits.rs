// Copyright 2024-2026 lowmem Contributors
// SPDX-License-Identifier: Apache-2.0

//! Allocation ceilings and size validation.
//!
//! A buffer asks its [`BufferLimits`] before touching the allocator, so an
//! oversized request fails the same way a refused allocation does.

use serde::{Deserialize, Serialize};

use super::BufferError;

/// Hard ceiling imposed by the allocator on a single object.
pub const ALLOCATOR_MAX_BYTES: usize = isize::MAX as usize;

/// Configuration for per-buffer allocation limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferLimits {
    /// Maximum bytes a single buffer may own.
    pub max_bytes: usize,
}

impl Default for BufferLimits {
    fn default() -> Self {
        Self {
            max_bytes: ALLOCATOR_MAX_BYTES,
        }
    }
}

impl BufferLimits {
    /// Limits with the given ceiling, clamped to what the allocator accepts.
    pub fn new(max_bytes: usize) -> Self {
        Self {
            max_bytes: max_bytes.min(ALLOCATOR_MAX_BYTES),
        }
    }

    /// Check that `bytes` may be allocated under these limits.
    pub fn check(&self, bytes: usize) -> Result<(), BufferError> {
        if bytes > self.max_bytes {
            return Err(BufferError::allocation(
                bytes,
                format!("exceeds limit of {} bytes", self.max_bytes),
            ));
        }
        Ok(())
    }
}

/// Convert a signed byte count from a host caller into a size.
///
/// Negative counts are rejected with [`BufferError::InvalidSize`]. Counts the
/// platform cannot address are an allocation failure, not a size error.
pub fn byte_count(requested: i64) -> Result<usize, BufferError> {
    if requested < 0 {
        return Err(BufferError::InvalidSize { requested });
    }
    usize::try_from(requested)
        .map_err(|_| BufferError::allocation(usize::MAX, "size not addressable on this platform"))
}
