// Copyright 2024-2026 lowmem Contributors
// SPDX-License-Identifier: Apache-2.0

//! Buffer error types.
//!
//! All errors are fail-closed: a rejected request never partially applies.

use thiserror::Error;

/// Errors surfaced by [`Buffer`](super::Buffer) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    #[error("Invalid size: {requested} bytes (must be non-negative)")]
    InvalidSize { requested: i64 },

    #[error("Allocation failed for {requested} bytes: {reason}")]
    AllocationFailure { requested: usize, reason: String },

    #[error("Memory access out of bounds: offset {offset} width {width} exceeds size {size}")]
    OutOfBounds {
        offset: usize,
        width: usize,
        size: usize,
    },
}

impl BufferError {
    /// Returns true if this error is a rejected read or write.
    pub fn is_bounds(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. })
    }

    /// Returns true if the storage provider refused the request.
    pub fn is_allocation(&self) -> bool {
        matches!(self, Self::AllocationFailure { .. })
    }

    pub(crate) fn allocation(requested: usize, reason: impl Into<String>) -> Self {
        Self::AllocationFailure {
            requested,
            reason: reason.into(),
        }
    }
}
