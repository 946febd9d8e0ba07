// Copyright 2024-2026 lowmem Contributors
// SPDX-License-Identifier: Apache-2.0

//! Fixed-width scalar encodings.
//!
//! Every typed accessor on [`Buffer`](super::Buffer) is a pure encode/decode
//! pair over a window of exactly [`Scalar::WIDTH`] bytes. Layout is the host's
//! native byte order so that the host side of the FFI boundary can read the
//! same bytes directly.

/// A value with a fixed-width native binary representation.
pub trait Scalar: Copy {
    /// Bytes occupied in storage.
    const WIDTH: usize;

    /// Write the native encoding into `out`.
    ///
    /// # Panics
    ///
    /// Panics if `out.len()` is not `WIDTH`. [`Buffer::write`](super::Buffer::write)
    /// only passes bounds-checked windows of that width.
    fn encode(self, out: &mut [u8]);

    /// Decode from exactly `WIDTH` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `bytes.len()` is not `WIDTH`. [`Buffer::read`](super::Buffer::read)
    /// only passes bounds-checked windows of that width.
    fn decode(bytes: &[u8]) -> Self;
}

macro_rules! impl_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Scalar for $ty {
                const WIDTH: usize = std::mem::size_of::<$ty>();

                #[inline]
                fn encode(self, out: &mut [u8]) {
                    out.copy_from_slice(&self.to_ne_bytes());
                }

                #[inline]
                fn decode(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; std::mem::size_of::<$ty>()];
                    raw.copy_from_slice(bytes);
                    <$ty>::from_ne_bytes(raw)
                }
            }
        )*
    };
}

// u8 is the one-byte character code; i32/f32/f64 are the int/float/double accessors.
impl_scalar!(u8, i32, f32, f64);
