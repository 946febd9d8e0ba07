// Copyright 2024-2026 lowmem Contributors
// SPDX-License-Identifier: Apache-2.0

//! Runtime configuration loading.
//!
//! Values come from an optional TOML file named by `LOWMEM_CONFIG_FILE`,
//! overridden by `LOWMEM_*` environment variables. Invalid values fall back
//! to defaults without crashing.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |---|---|---|
//! | `LOWMEM_CONFIG_FILE` | unset | Path to a TOML config file |
//! | `LOWMEM_MAX_BUFFER_BYTES` | 9223372036854775807 | Per-buffer allocation ceiling (bytes) |
//! | `LOWMEM_LOG_LEVEL` | info | Log filter directive |
//! | `LOWMEM_LOG_FORMAT` | json | `json` or `pretty` |
//! | `LOWMEM_LOG_FILE` | unset | Log file path (stderr when unset) |
//!
//! # File format
//!
//! ```toml
//! [buffer]
//! max_bytes = 1048576
//!
//! [log]
//! level = "lowmem=debug"
//! format = "pretty"
//! file = "/var/log/lowmem.log"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::memory::{BufferLimits, ALLOCATOR_MAX_BYTES};
use crate::telemetry::{LogConfig, LogFormat};

pub const CONFIG_FILE_VAR: &str = "LOWMEM_CONFIG_FILE";
pub const MAX_BUFFER_BYTES_VAR: &str = "LOWMEM_MAX_BUFFER_BYTES";
pub const LOG_LEVEL_VAR: &str = "LOWMEM_LOG_LEVEL";
pub const LOG_FORMAT_VAR: &str = "LOWMEM_LOG_FORMAT";
pub const LOG_FILE_VAR: &str = "LOWMEM_LOG_FILE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// `[buffer]` table of the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BufferSection {
    pub max_bytes: Option<usize>,
}

/// `[log]` table of the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogSection {
    pub level: Option<String>,
    pub format: Option<LogFormat>,
    pub file: Option<PathBuf>,
}

/// Parsed contents of a config file. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub buffer: BufferSection,
    pub log: LogSection,
}

/// All effective configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvConfig {
    pub limits: BufferLimits,
    pub log: LogConfig,
}

/// Effective configuration summary (serializable).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectiveConfig {
    pub max_buffer_bytes: usize,
    pub log_level: String,
    pub log_format: String,
    pub log_file: Option<String>,
}

impl EnvConfig {
    /// Return a serializable summary of all effective values.
    pub fn effective_config(&self) -> EffectiveConfig {
        EffectiveConfig {
            max_buffer_bytes: self.limits.max_bytes,
            log_level: self.log.level.clone(),
            log_format: self.log.format.as_str().to_string(),
            log_file: self
                .log
                .output_path
                .as_ref()
                .map(|p| p.display().to_string()),
        }
    }
}

/// Parse a TOML config file.
pub fn load_file(path: &Path) -> Result<FileConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a `usize` value, returning `default` on missing or invalid.
fn parse_usize(value: Option<String>, default: usize) -> usize {
    match value {
        Some(val) => val.trim().parse::<usize>().unwrap_or(default),
        None => default,
    }
}

/// Merge a config file with variables resolved through `lookup`.
///
/// Environment values win over file values; both fall back to defaults.
pub fn load_from<F>(file: FileConfig, lookup: F) -> EnvConfig
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = EnvConfig::default();

    let file_max = file.buffer.max_bytes.unwrap_or(ALLOCATOR_MAX_BYTES);
    let max_bytes = parse_usize(lookup(MAX_BUFFER_BYTES_VAR), file_max);

    let level = lookup(LOG_LEVEL_VAR)
        .filter(|v| !v.trim().is_empty())
        .or(file.log.level)
        .unwrap_or(defaults.log.level);

    let format = lookup(LOG_FORMAT_VAR)
        .and_then(|v| v.parse::<LogFormat>().ok())
        .or(file.log.format)
        .unwrap_or(defaults.log.format);

    let output_path = lookup(LOG_FILE_VAR)
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
        .or(file.log.file);

    EnvConfig {
        limits: BufferLimits::new(max_bytes),
        log: LogConfig {
            format,
            level,
            output_path,
        },
    }
}

/// Load configuration from the process environment.
///
/// An unreadable or malformed config file is logged and ignored.
pub fn load() -> EnvConfig {
    let file = match std::env::var(CONFIG_FILE_VAR) {
        Ok(path) if !path.trim().is_empty() => match load_file(Path::new(&path)) {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!(error = %e, "ignoring config file");
                FileConfig::default()
            }
        },
        _ => FileConfig::default(),
    };
    load_from(file, |key| std::env::var(key).ok())
}
