// Copyright 2024-2026 lowmem Contributors
// SPDX-License-Identifier: Apache-2.0

//! lowmem command-line entry point.
//!
//! ## Subcommands
//!
//! - `lowmem-cli selftest` - Run buffer self-tests (exit 0/1)
//! - `lowmem-cli config show [--json]` - Effective configuration
//! - `lowmem-cli config defaults` - Built-in defaults
//! - `lowmem-cli config validate` - Check configuration (exit 0/1/2)

use std::process::ExitCode;

use lowmem::cli::{self, config_cmd};
use lowmem::config;
use lowmem::telemetry::{init_logging, init_metrics};

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match command {
        "selftest" => {
            let cfg = config::load();
            if let Err(e) = init_logging(&cfg.log) {
                eprintln!("Logging disabled: {}", e);
            }
            init_metrics();
            exit_code(cli::run_selftest())
        }
        "config" => {
            let subcommand = args.get(2).map(|s| s.as_str()).unwrap_or("show");
            match subcommand {
                "show" => {
                    let json = args.get(3).map(|s| s.as_str()) == Some("--json");
                    exit_code(config_cmd::run_show(json))
                }
                "defaults" => {
                    config_cmd::run_defaults();
                    ExitCode::SUCCESS
                }
                "validate" => exit_code(config_cmd::run_validate()),
                _ => {
                    eprintln!("Unknown config subcommand: {}", subcommand);
                    print_usage();
                    ExitCode::FAILURE
                }
            }
        }
        "version" | "--version" | "-V" => {
            println!("lowmem {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        "help" | "--help" | "-h" => {
            print_usage();
            ExitCode::SUCCESS
        }
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            ExitCode::FAILURE
        }
    }
}

fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(code as u8)
}

fn print_usage() {
    let version = env!("CARGO_PKG_VERSION");
    eprintln!(
        "lowmem - manually managed raw memory buffers v{}

USAGE:
    lowmem-cli <COMMAND> [OPTIONS]

COMMANDS:
    selftest     Run buffer self-tests (exit 0 if all pass)
    config       Inspect configuration (show [--json], defaults, validate)
    version      Show version information
    help         Show this help message

ENVIRONMENT:
    LOWMEM_CONFIG_FILE       TOML config file
    LOWMEM_MAX_BUFFER_BYTES  Per-buffer allocation ceiling in bytes
    LOWMEM_LOG_LEVEL         Log filter (e.g. info, lowmem=debug)
    LOWMEM_LOG_FORMAT        json or pretty
    LOWMEM_LOG_FILE          Log file path (default: stderr)

EXIT CODES:
    0  Success
    1  Failure / warnings
    2  Configuration error
",
        version
    );
}
