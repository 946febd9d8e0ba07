// Copyright 2024-2026 lowmem Contributors
// SPDX-License-Identifier: Apache-2.0

//! Config CLI subcommands: show, defaults, validate.

use std::path::Path;

use super::exit;
use crate::config::{self, EffectiveConfig, EnvConfig, CONFIG_FILE_VAR};

/// Print effective config to stdout, as `KEY=value` lines or JSON.
pub fn run_show(json: bool) -> i32 {
    let cfg = config::load().effective_config();
    if json {
        match serde_json::to_string_pretty(&cfg) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                eprintln!("Failed to serialize config: {}", e);
                return exit::FAILURE;
            }
        }
    } else {
        print_config(&cfg);
    }
    exit::SUCCESS
}

/// Print default config values (no env or file overrides).
pub fn run_defaults() {
    print_config(&EnvConfig::default().effective_config());
}

/// Validate configuration for obvious misconfigurations.
///
/// Returns 0 if valid, 1 on warnings, 2 if the config file is unusable.
pub fn run_validate() -> i32 {
    if let Ok(path) = std::env::var(CONFIG_FILE_VAR) {
        if let Err(e) = config::load_file(Path::new(&path)) {
            eprintln!("ERROR: {}", e);
            return exit::CONFIG_ERROR;
        }
    }

    let warnings = validate(&config::load());
    for warning in &warnings {
        eprintln!("WARNING: {}", warning);
    }

    if warnings.is_empty() {
        println!("Configuration is valid.");
        exit::SUCCESS
    } else {
        exit::FAILURE
    }
}

/// Collect human-readable warnings for `cfg`.
pub fn validate(cfg: &EnvConfig) -> Vec<String> {
    let mut warnings = Vec::new();

    if cfg.limits.max_bytes == 0 {
        warnings.push(
            "LOWMEM_MAX_BUFFER_BYTES is 0; every non-empty allocation will fail".to_string(),
        );
    }

    if tracing_subscriber::EnvFilter::try_new(&cfg.log.level).is_err() {
        warnings.push(format!("LOWMEM_LOG_LEVEL '{}' is not a valid filter", cfg.log.level));
    }

    if let Some(path) = &cfg.log.output_path {
        let parent = path.parent().filter(|p| !p.as_os_str().is_empty());
        if let Some(dir) = parent {
            if !dir.is_dir() {
                warnings.push(format!("log directory {} does not exist", dir.display()));
            }
        }
    }

    warnings
}

fn print_config(cfg: &EffectiveConfig) {
    println!("LOWMEM_MAX_BUFFER_BYTES={}", cfg.max_buffer_bytes);
    println!("LOWMEM_LOG_LEVEL={}", cfg.log_level);
    println!("LOWMEM_LOG_FORMAT={}", cfg.log_format);
    println!("LOWMEM_LOG_FILE={}", cfg.log_file.as_deref().unwrap_or(""));
}
