//! Integration tests for Settings config loading with layered merge semantics.
//!
//! Merge Semantics:
//! - Scalars: later layer wins
//! - Tags: per-key union, later layer wins, "!" removes an inherited key
//!
//! Note: These tests run without a global config (temp directories only),
//! so they effectively test local and explicit config merging with defaults.

use std::fs;

use tempfile::TempDir;

use value2md::config::{local_config_path, Settings};

#[test]
fn given_no_config_when_loading_then_uses_defaults() {
    let dir = TempDir::new().unwrap();

    let settings = Settings::load(Some(dir.path()), None).expect("load defaults");

    assert_eq!(settings.title_level, 2);
    assert!(settings.max_depth > 0);
}

#[test]
fn given_local_config_when_loading_then_overrides_defaults() {
    // Arrange
    let dir = TempDir::new().unwrap();
    fs::write(
        local_config_path(dir.path()),
        "title_level = 4\ninput_format = \"yaml\"\n\n[tags]\ntitle = \"h1\"\n",
    )
    .unwrap();

    // Act
    let settings = Settings::load(Some(dir.path()), None).expect("load settings");

    // Assert
    assert_eq!(settings.title_level, 4);
    assert_eq!(settings.input_format, Some(value2md::InputFormat::Yaml));
    assert_eq!(settings.tags.get("title").map(String::as_str), Some("h1"));
}

#[test]
fn given_explicit_config_when_loading_then_unions_tags_with_local() {
    // Arrange
    let dir = TempDir::new().unwrap();
    fs::write(
        local_config_path(dir.path()),
        "[tags]\ntitle = \"h1\"\nbody = \"p\"\n",
    )
    .unwrap();
    let explicit = dir.path().join("extra.toml");
    fs::write(
        &explicit,
        "title_level = 1\n\n[tags]\ntitle = \"h2\"\nbody = \"!\"\npic = \"img\"\n",
    )
    .unwrap();

    // Act
    let settings = Settings::load(Some(dir.path()), Some(&explicit)).expect("load settings");

    // Assert: title overridden, body removed by negation, pic added
    assert_eq!(settings.title_level, 1);
    assert_eq!(settings.tags.get("title").map(String::as_str), Some("h2"));
    assert!(!settings.tags.contains_key("body"), "body should be removed by !");
    assert_eq!(settings.tags.get("pic").map(String::as_str), Some("img"));
    assert_eq!(settings.tags.len(), 2);
}

#[test]
fn given_missing_explicit_config_when_loading_then_errors() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.toml");

    let result = Settings::load(Some(dir.path()), Some(&missing));

    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("config file not found"));
}

#[test]
fn given_invalid_toml_when_loading_then_config_error() {
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), "title_level = [unclosed\n").unwrap();

    let result = Settings::load(Some(dir.path()), None);

    assert!(matches!(
        result,
        Err(value2md::ApplicationError::Config { .. })
    ));
}

#[test]
fn given_zero_max_depth_in_config_when_loading_then_config_error() {
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), "max_depth = 0\n").unwrap();

    let result = Settings::load(Some(dir.path()), None);

    assert!(matches!(
        result,
        Err(value2md::ApplicationError::Config { .. })
    ));
}

#[test]
fn given_configured_tags_when_tag_mapping_then_selects_mapping_mode() {
    let dir = TempDir::new().unwrap();
    fs::write(
        local_config_path(dir.path()),
        "[tags]\ntitle = \"h2\"\n",
    )
    .unwrap();
    let settings = Settings::load(Some(dir.path()), None).unwrap();

    let mapping = settings.tag_mapping();
    let input = value2md::Value::from(serde_json::json!({"title": "T", "other": "x"}));

    assert_eq!(
        value2md::convert(&input, Some(&mapping), settings.title_level).unwrap(),
        "##T\n"
    );
}
