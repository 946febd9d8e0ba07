// Copyright 2024-2026 lowmem Contributors
// SPDX-License-Identifier: Apache-2.0

//! Allocation metrics via the `metrics` facade.
//!
//! Without an installed recorder every call here is a no-op.

use metrics::{counter, describe_counter, describe_gauge, gauge, Unit};

pub const ALLOCATIONS_TOTAL: &str = "lowmem_allocations_total";
pub const ALLOCATION_FAILURES_TOTAL: &str = "lowmem_allocation_failures_total";
pub const OWNED_BYTES: &str = "lowmem_owned_bytes";

/// Register metric descriptions with the installed recorder.
pub fn init_metrics() {
    describe_counter!(ALLOCATIONS_TOTAL, "Successful buffer allocations");
    describe_counter!(
        ALLOCATION_FAILURES_TOTAL,
        "Allocation requests refused by the allocator or limits"
    );
    describe_gauge!(OWNED_BYTES, Unit::Bytes, "Bytes currently owned by live buffers");
}

pub fn record_allocation(bytes: usize) {
    if bytes == 0 {
        return;
    }
    counter!(ALLOCATIONS_TOTAL).increment(1);
    gauge!(OWNED_BYTES).increment(bytes as f64);
}

pub fn record_release(bytes: usize) {
    gauge!(OWNED_BYTES).decrement(bytes as f64);
}

/// Record an in-place resize from `previous` to `bytes`.
pub fn record_resize(previous: usize, bytes: usize) {
    if bytes >= previous {
        gauge!(OWNED_BYTES).increment((bytes - previous) as f64);
    } else {
        gauge!(OWNED_BYTES).decrement((previous - bytes) as f64);
    }
}

pub fn record_allocation_failure() {
    counter!(ALLOCATION_FAILURES_TOTAL).increment(1);
}
