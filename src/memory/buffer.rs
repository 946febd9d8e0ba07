// Copyright 2024-2026 lowmem Contributors
// SPDX-License-Identifier: Apache-2.0

//! Manually managed byte buffer with typed, offset-addressed access.
//!
//! A [`Buffer`] owns zero or one contiguous block of storage. Its size only
//! changes through [`allocate`](Buffer::allocate),
//! [`reallocate`](Buffer::reallocate) and [`deallocate`](Buffer::deallocate);
//! writes never grow it. Every accessor goes through a single bounds check,
//! [`Buffer::window`], so a rejected access never touches storage.

use std::fmt;
use std::ops::Range;

use super::codec::Scalar;
use super::{BufferError, BufferLimits};
use crate::telemetry;

/// Exclusively owned, resizable raw byte region.
///
/// The type is move-only: there is no `Clone`. Use
/// [`copy_buffer`](super::copy_buffer) or [`Buffer::copy_into`] for an
/// independent duplicate.
pub struct Buffer {
    data: Vec<u8>,
    limits: BufferLimits,
}

/// Create a buffer of `bytes` bytes under default limits.
///
/// `new_buffer(0)` returns an unallocated buffer.
pub fn new_buffer(bytes: usize) -> Result<Buffer, BufferError> {
    Buffer::with_size(bytes)
}

impl Buffer {
    /// Unallocated buffer under default limits.
    pub fn new() -> Self {
        Self::empty(BufferLimits::default())
    }

    /// Unallocated buffer under the given limits.
    pub fn empty(limits: BufferLimits) -> Self {
        Self {
            data: Vec::new(),
            limits,
        }
    }

    /// Buffer pre-sized to `bytes`, as if by a single [`allocate`](Self::allocate).
    pub fn with_size(bytes: usize) -> Result<Self, BufferError> {
        Self::with_limits(bytes, BufferLimits::default())
    }

    /// Buffer pre-sized to `bytes` under the given limits.
    pub fn with_limits(bytes: usize, limits: BufferLimits) -> Result<Self, BufferError> {
        let mut buffer = Self::empty(limits);
        if bytes > 0 {
            buffer.allocate(bytes)?;
        }
        Ok(buffer)
    }

    /// Current allocated byte count.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// True when the buffer owns storage.
    pub fn is_allocated(&self) -> bool {
        !self.data.is_empty()
    }

    pub fn limits(&self) -> BufferLimits {
        self.limits
    }

    // Memory management

    /// Replace any owned storage with `bytes` fresh bytes.
    ///
    /// Prior contents are discarded on success. On failure the buffer keeps
    /// its previous storage and size.
    pub fn allocate(&mut self, bytes: usize) -> Result<(), BufferError> {
        let storage = self.acquire(bytes)?;
        let previous = self.size();
        self.release();
        self.data = storage;
        telemetry::record_allocation(bytes);
        tracing::debug!(bytes, previous, "buffer allocated");
        Ok(())
    }

    /// Resize to `bytes`, preserving the first `min(size, bytes)` bytes.
    ///
    /// Grown bytes are zero-filled. On an unallocated buffer this is
    /// [`allocate`](Self::allocate). On failure nothing changes.
    pub fn reallocate(&mut self, bytes: usize) -> Result<(), BufferError> {
        if !self.is_allocated() {
            return self.allocate(bytes);
        }

        let previous = self.size();
        if let Err(err) = self.limits.check(bytes) {
            telemetry::record_allocation_failure();
            tracing::warn!(bytes, previous, error = %err, "buffer reallocation rejected");
            return Err(err);
        }

        if bytes > previous {
            if let Err(e) = self.data.try_reserve_exact(bytes - previous) {
                telemetry::record_allocation_failure();
                tracing::warn!(bytes, previous, error = %e, "buffer reallocation failed");
                return Err(BufferError::allocation(bytes, e.to_string()));
            }
            self.data.resize(bytes, 0);
        } else {
            self.data.truncate(bytes);
            self.data.shrink_to_fit();
        }

        telemetry::record_resize(previous, bytes);
        tracing::debug!(bytes, previous, "buffer reallocated");
        Ok(())
    }

    /// Release owned storage. Calling this on an empty buffer is a no-op.
    pub fn deallocate(&mut self) {
        let previous = self.size();
        if self.release() {
            tracing::debug!(previous, "buffer deallocated");
        }
    }

    // Raw access

    /// Bounds-checked range `[offset, offset + width)` into storage.
    ///
    /// Overflowing `offset + width` is out of bounds, as is any non-empty
    /// window on an unallocated buffer.
    pub fn window(&self, offset: usize, width: usize) -> Result<Range<usize>, BufferError> {
        let size = self.size();
        match offset.checked_add(width) {
            Some(end) if end <= size => Ok(offset..end),
            _ => {
                tracing::trace!(offset, width, size, "out of bounds access rejected");
                Err(BufferError::OutOfBounds {
                    offset,
                    width,
                    size,
                })
            }
        }
    }

    /// Borrowed view of `len` bytes at `offset`.
    pub fn view(&self, offset: usize, len: usize) -> Result<&[u8], BufferError> {
        let range = self.window(offset, len)?;
        Ok(&self.data[range])
    }

    /// Decode a fixed-width value at `offset`.
    pub fn read<T: Scalar>(&self, offset: usize) -> Result<T, BufferError> {
        let range = self.window(offset, T::WIDTH)?;
        Ok(T::decode(&self.data[range]))
    }

    /// Encode a fixed-width value at `offset`.
    pub fn write<T: Scalar>(&mut self, value: T, offset: usize) -> Result<(), BufferError> {
        let range = self.window(offset, T::WIDTH)?;
        value.encode(&mut self.data[range]);
        Ok(())
    }

    // Writing

    pub fn write_int(&mut self, value: i32, offset: usize) -> Result<(), BufferError> {
        self.write(value, offset)
    }

    pub fn write_float(&mut self, value: f32, offset: usize) -> Result<(), BufferError> {
        self.write(value, offset)
    }

    pub fn write_double(&mut self, value: f64, offset: usize) -> Result<(), BufferError> {
        self.write(value, offset)
    }

    /// Store a one-byte character code.
    pub fn write_char(&mut self, value: u8, offset: usize) -> Result<(), BufferError> {
        self.write(value, offset)
    }

    /// Copy `value` verbatim into storage at `offset`. Width is `value.len()`.
    pub fn write_bytes(&mut self, value: &[u8], offset: usize) -> Result<(), BufferError> {
        let range = self.window(offset, value.len())?;
        self.data[range].copy_from_slice(value);
        Ok(())
    }

    // Reading

    pub fn read_int(&self, offset: usize) -> Result<i32, BufferError> {
        self.read(offset)
    }

    pub fn read_float(&self, offset: usize) -> Result<f32, BufferError> {
        self.read(offset)
    }

    pub fn read_double(&self, offset: usize) -> Result<f64, BufferError> {
        self.read(offset)
    }

    pub fn read_char(&self, offset: usize) -> Result<u8, BufferError> {
        self.read(offset)
    }

    /// Copy `amount` bytes starting at `offset` out of the buffer.
    pub fn read_bytes(&self, amount: usize, offset: usize) -> Result<Vec<u8>, BufferError> {
        Ok(self.view(offset, amount)?.to_vec())
    }

    /// Replace `dest`'s storage with a duplicate of this buffer's bytes.
    ///
    /// The allocation happens under `dest`'s limits; if it fails, `dest` is
    /// left as it was.
    pub fn copy_into(&self, dest: &mut Buffer) -> Result<(), BufferError> {
        let size = self.size();
        dest.allocate(size)?;
        dest.write_bytes(self.view(0, size)?, 0)
    }

    fn acquire(&self, bytes: usize) -> Result<Vec<u8>, BufferError> {
        if let Err(err) = self.limits.check(bytes) {
            telemetry::record_allocation_failure();
            tracing::warn!(bytes, error = %err, "buffer allocation rejected");
            return Err(err);
        }

        let mut storage = Vec::new();
        if let Err(e) = storage.try_reserve_exact(bytes) {
            telemetry::record_allocation_failure();
            tracing::warn!(bytes, error = %e, "buffer allocation failed");
            return Err(BufferError::allocation(bytes, e.to_string()));
        }
        storage.resize(bytes, 0);
        Ok(storage)
    }

    /// Drop owned storage. Returns true if anything was released.
    fn release(&mut self) -> bool {
        let released = std::mem::take(&mut self.data);
        if released.is_empty() {
            return false;
        }
        telemetry::record_release(released.len());
        true
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Buffer {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("size", &self.size())
            .field("limits", &self.limits)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_unallocated() {
        let buffer = Buffer::new();
        assert_eq!(buffer.size(), 0);
        assert!(!buffer.is_allocated());
        assert!(buffer.read_char(0).unwrap_err().is_bounds());
    }

    #[test]
    fn with_size_zero_skips_allocation() {
        let buffer = Buffer::with_size(0).unwrap();
        assert!(!buffer.is_allocated());
    }

    #[test]
    fn allocate_zero_fills() {
        let buffer = Buffer::with_size(8).unwrap();
        assert_eq!(buffer.view(0, 8).unwrap(), &[0u8; 8]);
    }

    #[test]
    fn window_rejects_overflowing_offset() {
        let buffer = Buffer::with_size(8).unwrap();
        let err = buffer.window(usize::MAX, 2).unwrap_err();
        assert_eq!(
            err,
            BufferError::OutOfBounds {
                offset: usize::MAX,
                width: 2,
                size: 8
            }
        );
    }

    #[test]
    fn window_accepts_exact_end() {
        let buffer = Buffer::with_size(8).unwrap();
        assert_eq!(buffer.window(4, 4).unwrap(), 4..8);
        assert_eq!(buffer.window(8, 0).unwrap(), 8..8);
        assert!(buffer.window(5, 4).is_err());
    }

    #[test]
    fn failed_allocate_keeps_previous_storage() {
        let mut buffer = Buffer::with_limits(4, BufferLimits::new(8)).unwrap();
        buffer.write_int(7, 0).unwrap();

        let err = buffer.allocate(9).unwrap_err();

        assert!(err.is_allocation());
        assert_eq!(buffer.size(), 4);
        assert_eq!(buffer.read_int(0).unwrap(), 7);
    }

    #[test]
    fn shrinking_to_zero_releases_storage() {
        let mut buffer = Buffer::with_size(16).unwrap();
        buffer.reallocate(0).unwrap();
        assert_eq!(buffer.size(), 0);
        assert!(!buffer.is_allocated());
    }

    #[test]
    fn debug_omits_contents() {
        let buffer = Buffer::with_size(3).unwrap();
        let rendered = format!("{:?}", buffer);
        assert!(rendered.contains("size: 3"));
    }
}
