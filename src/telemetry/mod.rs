// Copyright 2024-2026 lowmem Contributors
// SPDX-License-Identifier: Apache-2.0

//! Telemetry for lowmem: structured logging and allocation metrics.

mod logging;
mod metrics;

pub use self::logging::{init_logging, LogConfig, LogError, LogFormat};
pub use self::metrics::{
    init_metrics, record_allocation, record_allocation_failure, record_release, record_resize,
    ALLOCATIONS_TOTAL, ALLOCATION_FAILURES_TOTAL, OWNED_BYTES,
};
