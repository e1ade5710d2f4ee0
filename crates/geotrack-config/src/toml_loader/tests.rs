//! Tests for TOML config loading, creation, and path resolution.

use super::*;
use std::path::Path;

#[test]
fn load_from_nonexistent_returns_parse_error() {
    let result = load_from_path(Path::new("/tmp/nonexistent_geotrack_config.toml"));
    let err = result.unwrap_err();
    assert!(matches!(err, geotrack_common::ConfigError::ParseError(_)));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[broker]
url = "wss://broker.example.com/stomp"

[publisher]
alias = "alice"
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.broker.url, "wss://broker.example.com/stomp");
    assert_eq!(config.publisher.alias.as_deref(), Some("alice"));
    // Defaults preserved
    assert_eq!(config.broker.destination, "jms.topic.trackers");
    assert_eq!(config.map.zoom, 14);
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let err = load_from_path(&path).unwrap_err();
    assert!(matches!(err, geotrack_common::ConfigError::ParseError(_)));
}

#[test]
fn load_with_invalid_values_is_validation_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[map]\nzoom = 99\n").unwrap();

    let err = load_from_path(&path).unwrap_err();
    assert!(matches!(err, geotrack_common::ConfigError::ValidationError(_)));
    assert!(err.to_string().contains("map.zoom"));
}

#[test]
fn create_and_load_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("geotrack").join("config.toml");

    create_default_config(&path).unwrap();
    assert!(path.exists());

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.broker.url, "ws://localhost:61614/stomp");
    assert_eq!(config.map.zoom, 14);
}

#[test]
fn default_config_path_ends_with_geotrack() {
    if let Ok(path) = default_config_path() {
        assert!(path.ends_with("geotrack/config.toml"));
    }
}
