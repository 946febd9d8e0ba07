// Copyright 2024-2026 lowmem Contributors
// SPDX-License-Identifier: Apache-2.0

//! `selftest` subcommand.

use super::exit;
use crate::selftest::run_self_tests;

/// Run the buffer self-tests and report each check.
pub fn run_selftest() -> i32 {
    let (results, first_error) = run_self_tests();

    for (name, passed) in results.checks() {
        let status = if passed { "PASSED" } else { "FAILED" };
        println!("{:<20}{}", format!("{}:", name), status);
    }

    match first_error {
        None => exit::SUCCESS,
        Some(e) => {
            eprintln!("Self-test FAILED: {}", e);
            exit::FAILURE
        }
    }
}
