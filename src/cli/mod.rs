// Copyright 2024-2026 lowmem Contributors
// SPDX-License-Identifier: Apache-2.0

//! CLI module for lowmem commands.
//!
//! ## Usage
//!
//! ```bash
//! lowmem-cli selftest          # Run buffer self-tests, exits 0 on pass
//! lowmem-cli config show       # Print effective configuration
//! lowmem-cli config validate   # Check configuration for mistakes
//! ```

pub mod config_cmd;
pub mod selftest_cmd;

pub use selftest_cmd::run_selftest;

/// Process exit codes used by all subcommands.
pub mod exit {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
    pub const CONFIG_ERROR: i32 = 2;
}
