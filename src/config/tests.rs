//! Configuration tests
//!
//! Round-trips guard the template: every field written by `to_toml()` must
//! parse back into `FileConfig` with the same value.

use super::*;
use std::collections::HashMap;

fn no_env(_: &str) -> Option<String> {
    None
}

fn parse(toml_str: &str) -> FileConfig {
    toml::from_str(toml_str).expect("config should parse")
}

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let toml_str = config.to_toml();

    let parsed: Result<FileConfig, _> = toml::from_str(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );
}

#[test]
fn test_config_roundtrip_preserves_values() {
    let mut config = Config::default();
    config.theme = "Court Light".to_string();
    config.use_theme_background = false;
    config.start_route = "/students".to_string();
    config.layout.compact_below = 72;
    config.layout.tick_ms = 100;
    config.features.clipboard = false;
    config.logging.level = "debug".to_string();
    config.logging.file_enabled = true;
    config.logging.file_rotation = LogRotation::Hourly;

    let resolved = Config::resolve(parse(&config.to_toml()), no_env);

    assert_eq!(resolved.theme, "Court Light");
    assert!(!resolved.use_theme_background);
    assert_eq!(resolved.start_route, "/students");
    assert_eq!(resolved.layout, config.layout);
    assert!(!resolved.features.clipboard);
    assert!(resolved.features.logs_panel);
    assert_eq!(resolved.logging.level, "debug");
    assert!(resolved.logging.file_enabled);
    assert_eq!(resolved.logging.file_rotation, LogRotation::Hourly);
    assert_eq!(resolved.logging.file_prefix, "courtside");
}

#[test]
fn test_template_mentions_every_section() {
    let toml_str = Config::default().to_toml();
    for section in ["[layout]", "[features]", "[logging]"] {
        assert!(toml_str.contains(section), "{} missing:\n{}", section, toml_str);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Precedence
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_empty_file_gives_defaults() {
    let config = Config::resolve(parse(""), no_env);
    assert_eq!(config.theme, DEFAULT_THEME);
    assert_eq!(config.start_route, DEFAULT_ROUTE);
    assert_eq!(config.layout, LayoutConfig::default());
    assert_eq!(config.logging.file_rotation, LogRotation::Daily);
}

#[test]
fn test_env_overrides_file() {
    let file = parse(
        r#"
theme = "Terminal"
start_route = "/students"

[layout]
compact_below = 90
"#,
    );
    let env: HashMap<&str, &str> = [
        ("COURTSIDE_THEME", "Court Light"),
        ("COURTSIDE_ROUTE", "/sessions/new"),
        ("COURTSIDE_COMPACT_BELOW", " 120 "),
    ]
    .into_iter()
    .collect();

    let config = Config::resolve(file, |key| env.get(key).map(|v| v.to_string()));

    assert_eq!(config.theme, "Court Light");
    assert_eq!(config.start_route, "/sessions/new");
    assert_eq!(config.layout.compact_below, 120);
}

#[test]
fn test_unparsable_env_threshold_keeps_file_value() {
    let file = parse("[layout]\ncompact_below = 90\n");
    let config = Config::resolve(file, |key| {
        (key == "COURTSIDE_COMPACT_BELOW").then(|| "wide".to_string())
    });
    assert_eq!(config.layout.compact_below, 90);
}

#[test]
fn test_zero_tick_falls_back() {
    let config = Config::resolve(parse("[layout]\ntick_ms = 0\n"), no_env);
    assert_eq!(config.layout.tick_ms, 250);
}

#[test]
fn test_zero_log_buffer_falls_back() {
    let config = Config::resolve(parse("[logging]\nbuffer_entries = 0\n"), no_env);
    assert_eq!(config.logging.buffer_entries, DEFAULT_BUFFER_ENTRIES);

    let config = Config::resolve(parse("[logging]\nbuffer_entries = 50\n"), no_env);
    assert_eq!(config.logging.buffer_entries, 50);
}

#[test]
fn test_unknown_rotation_is_daily() {
    let config = Config::resolve(parse("[logging]\nfile_rotation = \"weekly\"\n"), no_env);
    assert_eq!(config.logging.file_rotation, LogRotation::Daily);
}

// ─────────────────────────────────────────────────────────────────────────────
// File loading
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_missing_file_is_none() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = Config::read_file_config(&dir.path().join("config.toml")).unwrap();
    assert!(loaded.is_none());
}

#[test]
fn test_write_default_then_read() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    Config::write_default(&path).unwrap();
    let file = Config::read_file_config(&path).unwrap().unwrap();

    assert_eq!(file.theme.as_deref(), Some(DEFAULT_THEME));
    assert_eq!(file.layout.and_then(|l| l.compact_below), Some(100));
}

#[test]
fn test_broken_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "theme = \n").unwrap();

    let err = Config::read_file_config(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("parsing"));
}
