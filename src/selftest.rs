// Copyright 2024-2026 lowmem Contributors
// SPDX-License-Identifier: Apache-2.0

//! Power-on self-tests for the buffer core.
//!
//! Runs known-answer checks against live buffers:
//! - Scalar encodings at fixed offsets
//! - Bounds enforcement at the upper edge
//! - Content preservation across reallocation
//! - Storage isolation of deep copies
//!
//! A host embedding lowmem can run these once at startup and refuse to hand
//! out buffers if any fails.

use thiserror::Error;

use crate::memory::{copy_buffer, Buffer, BufferError};

#[derive(Debug, Error)]
pub enum SelfTestError {
    #[error("Scalar known-answer test failed: {0}")]
    ScalarMismatch(String),
    #[error("Bounds test failed: {0}")]
    BoundsNotEnforced(String),
    #[error("Reallocation test failed: {0}")]
    ContentLost(String),
    #[error("Copy isolation test failed: {0}")]
    CopyAliased(String),
    #[error("Buffer operation failed during self-test: {0}")]
    Buffer(#[from] BufferError),
}

/// Outcome of each self-test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelfTestResults {
    pub scalar_passed: bool,
    pub bounds_passed: bool,
    pub realloc_passed: bool,
    pub copy_passed: bool,
}

impl SelfTestResults {
    /// Check if all tests passed
    pub fn all_passed(&self) -> bool {
        self.scalar_passed && self.bounds_passed && self.realloc_passed && self.copy_passed
    }

    /// Check names paired with their outcome, in run order.
    pub fn checks(&self) -> [(&'static str, bool); 4] {
        [
            ("scalar encodings", self.scalar_passed),
            ("bounds enforcement", self.bounds_passed),
            ("reallocation", self.realloc_passed),
            ("copy isolation", self.copy_passed),
        ]
    }
}

/// Run every self-test, recording each outcome independently.
///
/// Returns the per-check results and the first failure, if any.
pub fn run_self_tests() -> (SelfTestResults, Option<SelfTestError>) {
    let mut first_error = None;
    let mut passed = |outcome: Result<(), SelfTestError>| match outcome {
        Ok(()) => true,
        Err(e) => {
            tracing::error!(error = %e, "buffer self-test failed");
            if first_error.is_none() {
                first_error = Some(e);
            }
            false
        }
    };

    let results = SelfTestResults {
        scalar_passed: passed(scalar_kat()),
        bounds_passed: passed(bounds_test()),
        realloc_passed: passed(realloc_test()),
        copy_passed: passed(copy_isolation_test()),
    };
    (results, first_error)
}

/// Run all self-tests, failing with the first check that did not pass.
pub fn run_power_on_self_tests() -> Result<SelfTestResults, SelfTestError> {
    match run_self_tests() {
        (_, Some(err)) => Err(err),
        (results, None) => {
            tracing::info!("buffer self-tests passed");
            Ok(results)
        }
    }
}

/// Mixed scalar layout in a 16-byte buffer.
pub fn scalar_kat() -> Result<(), SelfTestError> {
    let mut buffer = Buffer::with_size(16)?;
    buffer.write_int(42, 0)?;
    buffer.write_double(2.75, 4)?;
    buffer.write_char(b'A', 12)?;
    if buffer.write_float(-1.5, 13).is_ok() {
        return Err(SelfTestError::ScalarMismatch(
            "float at offset 13 should not fit".into(),
        ));
    }

    if buffer.read_int(0)? != 42 {
        return Err(SelfTestError::ScalarMismatch("int at offset 0".into()));
    }
    if buffer.read_double(4)?.to_bits() != 2.75f64.to_bits() {
        return Err(SelfTestError::ScalarMismatch("double at offset 4".into()));
    }
    if buffer.read_char(12)? != b'A' {
        return Err(SelfTestError::ScalarMismatch("char at offset 12".into()));
    }
    if buffer.read_bytes(4, 0)? != 42i32.to_ne_bytes() {
        return Err(SelfTestError::ScalarMismatch(
            "raw bytes of int differ from native encoding".into(),
        ));
    }
    Ok(())
}

/// Zero-width read at the end succeeds, one byte past it fails.
pub fn bounds_test() -> Result<(), SelfTestError> {
    let buffer = Buffer::with_size(8)?;
    if !buffer.read_bytes(0, 8)?.is_empty() {
        return Err(SelfTestError::BoundsNotEnforced(
            "zero-width read returned data".into(),
        ));
    }
    match buffer.read_bytes(1, 8) {
        Err(e) if e.is_bounds() => {}
        _ => {
            return Err(SelfTestError::BoundsNotEnforced(
                "read past end was accepted".into(),
            ))
        }
    }
    if Buffer::new().read_char(0).is_ok() {
        return Err(SelfTestError::BoundsNotEnforced(
            "read from unallocated buffer was accepted".into(),
        ));
    }
    Ok(())
}

/// Grow then shrink, checking the preserved prefix each time.
pub fn realloc_test() -> Result<(), SelfTestError> {
    let pattern: Vec<u8> = (0u8..32).collect();
    let mut buffer = Buffer::with_size(pattern.len())?;
    buffer.write_bytes(&pattern, 0)?;

    buffer.reallocate(64)?;
    if buffer.view(0, 32)? != pattern.as_slice() {
        return Err(SelfTestError::ContentLost("grow changed prefix".into()));
    }

    buffer.reallocate(8)?;
    if buffer.size() != 8 || buffer.view(0, 8)? != &pattern[..8] {
        return Err(SelfTestError::ContentLost("shrink changed prefix".into()));
    }
    Ok(())
}

/// A write to a copy must not be visible through the source.
pub fn copy_isolation_test() -> Result<(), SelfTestError> {
    let mut source = Buffer::with_size(4)?;
    source.write_int(7, 0)?;

    let mut copy = copy_buffer(&source)?;
    copy.write_int(8, 0)?;

    if source.read_int(0)? != 7 || copy.read_int(0)? != 8 {
        return Err(SelfTestError::CopyAliased(
            "source observed a write to its copy".into(),
        ));
    }
    Ok(())
}
