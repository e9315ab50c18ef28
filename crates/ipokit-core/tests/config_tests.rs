//! Configuration integration tests.
//!
//! Tests for configuration loading and merging from files on disk.

use ipokit_core::config::Config;
use ipokit_core::{ConfigError, CoreError};
use std::fs;
use tempfile::TempDir;

/// Test that config loads from project directory.
#[tokio::test]
async fn test_load_project_config() {
    let temp = TempDir::new().expect("Failed to create temp dir");

    let config_content = r#"{
        "theme": "sakura",
        "toast": { "default_duration_ms": 4000 }
    }"#;
    fs::write(temp.path().join("ipokit.json"), config_content).expect("Failed to write config");

    let (config, sources) = Config::load(Some(temp.path()), None)
        .await
        .expect("Failed to load config");

    assert_eq!(config.theme, Some("sakura".to_string()));
    assert_eq!(config.toast.unwrap().default_duration_ms, Some(4000));
    assert!(sources.iter().any(|s| s.ends_with("ipokit.json")));
}

/// Test that JSONC comments are handled and `.jsonc` wins over `.json`.
#[tokio::test]
async fn test_load_jsonc_config() {
    let temp = TempDir::new().expect("Failed to create temp dir");

    let config_content = r#"{
        // Listing date for the countdown banner
        "countdown": {
            "target": "2026-03-19T00:00:00Z",
            /* hide seconds on the pricing page */
            "show_seconds": false
        }
    }"#;
    fs::write(temp.path().join("ipokit.jsonc"), config_content).expect("Failed to write config");
    fs::write(temp.path().join("ipokit.json"), r#"{ "theme": "ignored" }"#)
        .expect("Failed to write config");

    let (config, _) = Config::load(Some(temp.path()), None)
        .await
        .expect("Failed to load config");

    let countdown = config.countdown.expect("countdown section");
    assert_eq!(countdown.show_seconds, Some(false));
    assert!(countdown.target.is_some());
    assert_ne!(config.theme, Some("ignored".to_string()));
}

/// Explicit file overrides the project file field by field.
#[tokio::test]
async fn test_explicit_file_overrides_project() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    fs::write(
        temp.path().join("ipokit.json"),
        r#"{ "scroll": { "item_height": 3, "overscan": 2 } }"#,
    )
    .expect("Failed to write config");

    let explicit = temp.path().join("override.json");
    fs::write(&explicit, r#"{ "scroll": { "overscan": 6 } }"#).expect("Failed to write config");

    let (config, sources) = Config::load(Some(temp.path()), Some(&explicit))
        .await
        .expect("Failed to load config");

    let scroll = config.scroll.expect("scroll section");
    assert_eq!(scroll.item_height, Some(3));
    assert_eq!(scroll.overscan, Some(6));
    assert_eq!(sources.last(), Some(&explicit));
}

/// A missing explicit file is an error, unlike missing optional files.
#[tokio::test]
async fn test_missing_explicit_file() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let missing = temp.path().join("nope.json");

    let result = Config::load(Some(temp.path()), Some(&missing)).await;
    assert!(matches!(
        result,
        Err(CoreError::Config(ConfigError::NotFound { .. }))
    ));
}

/// Invalid values are rejected after merging.
#[tokio::test]
async fn test_invalid_values_rejected() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    fs::write(
        temp.path().join("ipokit.json"),
        r#"{ "scroll": { "page_size": 0 } }"#,
    )
    .expect("Failed to write config");

    let result = Config::load(Some(temp.path()), None).await;
    assert!(matches!(
        result,
        Err(CoreError::Config(ConfigError::Validation { .. }))
    ));
}

/// Test that a directory without config yields no project source.
#[tokio::test]
async fn test_default_config() {
    let temp = TempDir::new().expect("Failed to create temp dir");

    let (_, sources) = Config::load(Some(temp.path()), None)
        .await
        .expect("Failed to load config");

    assert!(!sources.iter().any(|s| s.starts_with(temp.path())));
}
