// Copyright 2024-2026 lowmem Contributors
// SPDX-License-Identifier: Apache-2.0

//! Deep copy of a buffer through its public read/write/allocate contract.

use super::{Buffer, BufferError};

/// Produce an independent, byte-for-byte duplicate of `source`.
///
/// An unallocated source yields an unallocated copy without touching the
/// allocator. The copy inherits the source's limits. Bytes go straight from
/// the source into the new storage, so the only allocation is the copy's own,
/// and refusing it surfaces as [`BufferError::AllocationFailure`]. `source` is
/// only borrowed, so a failed copy cannot have modified it.
pub fn copy_buffer(source: &Buffer) -> Result<Buffer, BufferError> {
    if !source.is_allocated() {
        return Ok(Buffer::empty(source.limits()));
    }

    let size = source.size();
    let mut copy = Buffer::with_limits(size, source.limits())?;
    copy.write_bytes(source.view(0, size)?, 0)?;

    tracing::debug!(bytes = size, "buffer copied");
    Ok(copy)
}
