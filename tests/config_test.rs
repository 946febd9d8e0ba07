//! Configuration loading tests.

use std::io::Write;
use std::path::{Path, PathBuf};

use lowmem::config::{
    load_file, load_from, ConfigError, EnvConfig, FileConfig, LOG_FILE_VAR, LOG_FORMAT_VAR,
    LOG_LEVEL_VAR, MAX_BUFFER_BYTES_VAR,
};
use lowmem::memory::ALLOCATOR_MAX_BYTES;
use lowmem::telemetry::LogFormat;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn load_file_reads_all_sections() {
    let file = write_config(
        r#"
        [buffer]
        max_bytes = 4096

        [log]
        level = "lowmem=trace"
        format = "pretty"
        file = "/tmp/lowmem.log"
        "#,
    );

    let parsed = load_file(file.path()).unwrap();
    let cfg = load_from(parsed, no_env);

    assert_eq!(cfg.limits.max_bytes, 4096);
    assert_eq!(cfg.log.level, "lowmem=trace");
    assert_eq!(cfg.log.format, LogFormat::Pretty);
    assert_eq!(cfg.log.output_path, Some(PathBuf::from("/tmp/lowmem.log")));
}

#[test]
fn empty_file_gives_defaults() {
    let file = write_config("");
    let parsed = load_file(file.path()).unwrap();
    assert_eq!(parsed, FileConfig::default());
    assert_eq!(load_from(parsed, no_env), EnvConfig::default());
}

#[test]
fn missing_file_is_read_error() {
    let err = load_file(Path::new("/nonexistent/lowmem.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
    assert!(err.to_string().contains("/nonexistent/lowmem.toml"));
}

#[test]
fn malformed_file_is_parse_error() {
    let file = write_config("[buffer\nmax_bytes = ");
    let err = load_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn env_values_override_and_fall_back() {
    let cfg = load_from(FileConfig::default(), |key| match key {
        k if k == MAX_BUFFER_BYTES_VAR => Some(" 2048 ".to_string()),
        k if k == LOG_LEVEL_VAR => Some("debug".to_string()),
        k if k == LOG_FORMAT_VAR => Some("yaml".to_string()),
        k if k == LOG_FILE_VAR => Some(String::new()),
        _ => None,
    });

    assert_eq!(cfg.limits.max_bytes, 2048);
    assert_eq!(cfg.log.level, "debug");
    assert_eq!(cfg.log.format, LogFormat::Json);
    assert!(cfg.log.output_path.is_none());
}

#[test]
fn effective_config_serializes() {
    let cfg = EnvConfig::default().effective_config();
    let json = serde_json::to_value(&cfg).unwrap();

    assert_eq!(json["max_buffer_bytes"], ALLOCATOR_MAX_BYTES as u64);
    assert_eq!(json["log_level"], "info");
    assert_eq!(json["log_format"], "json");
    assert!(json["log_file"].is_null());
}
