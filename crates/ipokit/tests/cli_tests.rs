//! CLI integration tests.
//!
//! These tests exercise the non-interactive commands end-to-end. Each run
//! gets an empty home and working directory so no real config leaks in.

use ipokit_test_utils::TestProject;
use std::path::Path;
use std::process::{Command, Output};

fn run_in(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ipokit"))
        .args(args)
        .current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env_remove("IPOKIT_CONFIG_CONTENT")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command")
}

fn run(args: &[&str]) -> Output {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    run_in(temp_dir.path(), args)
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_help_command() {
    let output = run(&["--help"]);

    assert!(output.status.success());
    let stdout = stdout(&output);
    assert!(stdout.contains("IPO-consulting site widgets"));
    for command in ["demo", "faq", "validate", "countdown", "config"] {
        assert!(stdout.contains(command), "missing {command}");
    }
    assert!(stdout.contains("--theme"));
}

#[test]
fn test_faq_query_json() {
    let output = run(&["faq", "--query", "バリュエーション", "--json"]);

    assert!(output.status.success());
    let items: Vec<serde_json::Value> =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    let ids: Vec<_> = items.iter().filter_map(|i| i["id"].as_str()).collect();
    assert_eq!(ids, vec!["valuation", "success-fee"]);
}

#[test]
fn test_faq_no_match() {
    let output = run(&["faq", "-q", "存在しない質問"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("No matching questions found"));
}

#[test]
fn test_faq_from_configured_file() {
    let project = TestProject::new()
        .with_sample_faqs()
        .with_config(r#"{ "faq": { "path": "faq.json" } }"#)
        .build();

    let output = run_in(project.path(), &["faq", "--category", "費用", "--json"]);

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let items: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert!(!items.is_empty());
    assert!(items.iter().all(|i| i["category"] == "費用"));
}

#[test]
fn test_faq_categories() {
    let output = run(&["faq", "--categories"]);

    assert!(output.status.success());
    let stdout = stdout(&output);
    let categories: Vec<_> = stdout.lines().collect();
    assert_eq!(categories, vec!["上場準備", "資本政策", "費用", "内部管理体制"]);
}

#[test]
fn test_validate_valid_value() {
    let output = run(&["validate", "--rule", "email", "--required", "cfo@example.co.jp"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "valid");
}

#[test]
fn test_validate_invalid_value_exits_with_one() {
    let output = run(&["validate", "--rule", "email", "not-an-email"]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout(&output).trim(),
        "invalid: Please enter a valid email address"
    );
}

#[test]
fn test_validate_required_takes_precedence() {
    let output = run(&["validate", "--rule", "min:3", "--required", "--json", "  "]);

    assert_eq!(output.status.code(), Some(1));
    let outcome: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(outcome["is_valid"], false);
    assert_eq!(outcome["error"], "This field is required");
}

#[test]
fn test_validate_unknown_rule_fails() {
    let output = run(&["validate", "--rule", "zip", "123"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown rule"));
}

#[test]
fn test_countdown_past_target_is_zero() {
    let output = run(&["countdown", "--target", "2020-01-01T00:00:00Z", "--json"]);

    assert!(output.status.success());
    let state: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(state["days"], 0);
    assert_eq!(state["seconds"], 0);
    assert_eq!(state["completed"], true);
}

#[test]
fn test_countdown_without_target_fails() {
    let output = run(&["countdown"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("No countdown target"));
}

#[test]
fn test_countdown_uses_configured_target() {
    let project = TestProject::new()
        .with_jsonc_config(
            r#"{
                // Already passed
                "countdown": { "target": "2021-03-01T00:00:00Z", "show_days": false }
            }"#,
        )
        .build();

    let output = run_in(project.path(), &["countdown"]);

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout(&output).contains("(completed)"));
}

#[test]
fn test_config_command_shows_project_config() {
    let project = TestProject::new()
        .with_config(r#"{ "theme": "light", "toast": { "max_visible": 2 } }"#)
        .build();

    let output = run_in(project.path(), &["config"]);

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = stdout(&output);
    assert!(stdout.contains("ipokit.json"));
    assert!(stdout.contains("\"theme\": \"light\""));
}

#[test]
fn test_invalid_config_reports_error() {
    let project = TestProject::new().with_config("{ not json").build();

    let output = run_in(project.path(), &["config"]);

    assert!(!output.status.success());
}

#[test]
fn test_explicit_config_must_exist() {
    let output = run(&["--config", "missing.json", "config"]);

    assert!(!output.status.success());
}
