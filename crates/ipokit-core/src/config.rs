//! Configuration management for ipokit.
//!
//! Configuration is loaded from multiple sources and merged, later sources
//! overriding earlier ones field by field:
//! 1. Global config: `~/.config/ipokit/config.json`
//! 2. Environment variable: `IPOKIT_CONFIG_CONTENT`
//! 3. Project config: `ipokit.jsonc` or `ipokit.json` in the working directory
//! 4. An explicit file passed on the command line
//!
//! Supports JSONC (JSON with comments) and `{env:VAR_NAME}` substitution.

use crate::error::{ConfigError, CoreError, CoreResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Static regex for variable substitution, compiled once.
static VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

fn var_regex() -> &'static regex::Regex {
    VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\{env:([^}]+)\}")
            .expect("Invalid regex pattern - this is a compile-time constant")
    })
}

/// Environment variable holding inline config content.
pub const CONFIG_CONTENT_ENV: &str = "IPOKIT_CONFIG_CONTENT";

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// JSON Schema reference.
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Theme name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    /// Log level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<LogLevel>,

    /// Countdown banner settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub countdown: Option<CountdownConfig>,

    /// Toast notification settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toast: Option<ToastConfig>,

    /// List scrolling settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scroll: Option<ScrollConfig>,

    /// FAQ data settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faq: Option<FaqConfig>,
}

/// Log levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for ipokit_util::log::LogLevel {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Self::Trace,
            LogLevel::Debug => Self::Debug,
            LogLevel::Info => Self::Info,
            LogLevel::Warn => Self::Warn,
            LogLevel::Error => Self::Error,
        }
    }
}

/// Countdown banner configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountdownConfig {
    /// Target end time (RFC 3339).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<DateTime<Utc>>,

    /// Banner label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_days: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_hours: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_minutes: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_seconds: Option<bool>,
}

impl CountdownConfig {
    fn merge(self, other: Self) -> Self {
        Self {
            target: merge_option(self.target, other.target),
            label: merge_option(self.label, other.label),
            show_days: merge_option(self.show_days, other.show_days),
            show_hours: merge_option(self.show_hours, other.show_hours),
            show_minutes: merge_option(self.show_minutes, other.show_minutes),
            show_seconds: merge_option(self.show_seconds, other.show_seconds),
        }
    }
}

/// Toast configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToastConfig {
    /// Default time a toast stays on screen, in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_duration_ms: Option<u64>,

    /// Maximum number of toasts drawn at once.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_visible: Option<usize>,
}

impl ToastConfig {
    fn merge(self, other: Self) -> Self {
        Self {
            default_duration_ms: merge_option(self.default_duration_ms, other.default_duration_ms),
            max_visible: merge_option(self.max_visible, other.max_visible),
        }
    }
}

/// Scrolling list configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Rows per list item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_height: Option<u16>,

    /// Items rendered beyond each edge of the viewport.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overscan: Option<usize>,

    /// Distance in rows from the viewport at which more items are requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<u16>,

    /// Items fetched per load.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,
}

impl ScrollConfig {
    fn merge(self, other: Self) -> Self {
        Self {
            item_height: merge_option(self.item_height, other.item_height),
            overscan: merge_option(self.overscan, other.overscan),
            threshold: merge_option(self.threshold, other.threshold),
            page_size: merge_option(self.page_size, other.page_size),
        }
    }
}

/// FAQ data configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaqConfig {
    /// JSON file with FAQ entries; the built-in set is used when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Config {
    /// Merge another config into this one. Values from `other` win.
    pub fn merge(mut self, other: Self) -> Self {
        self.schema = merge_option(self.schema, other.schema);
        self.theme = merge_option(self.theme, other.theme);
        self.log_level = merge_option(self.log_level, other.log_level);
        self.countdown = merge_section(self.countdown, other.countdown, CountdownConfig::merge);
        self.toast = merge_section(self.toast, other.toast, ToastConfig::merge);
        self.scroll = merge_section(self.scroll, other.scroll, ScrollConfig::merge);
        self.faq = merge_section(self.faq, other.faq, |a, b| FaqConfig {
            path: merge_option(a.path, b.path),
        });
        self
    }

    /// Load configuration from all sources.
    ///
    /// Returns the merged config and the files it was read from.
    pub async fn load(
        project_dir: Option<&Path>,
        explicit: Option<&Path>,
    ) -> CoreResult<(Self, Vec<PathBuf>)> {
        let mut config = Config::default();
        let mut sources = Vec::new();

        // 1. Global config
        if let Some(global_dir) = Self::global_config_dir() {
            for name in &["config.json", "ipokit.json", "ipokit.jsonc"] {
                let path = global_dir.join(name);
                if path.exists() {
                    config = config.merge(Self::load_file(&path).await?);
                    sources.push(path);
                    break;
                }
            }
        }

        // 2. Environment variable
        if let Ok(content) = std::env::var(CONFIG_CONTENT_ENV) {
            let content = Self::substitute_variables(&content)?;
            config = config.merge(Self::parse_jsonc(&content, "<env>")?);
        }

        // 3. Project config
        if let Some(dir) = project_dir {
            for name in &["ipokit.jsonc", "ipokit.json"] {
                let path = dir.join(name);
                if path.exists() {
                    config = config.merge(Self::load_file(&path).await?);
                    sources.push(path);
                    break;
                }
            }
        }

        // 4. Explicit file
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ConfigError::NotFound {
                    path: path.to_path_buf(),
                }
                .into());
            }
            config = config.merge(Self::load_file(path).await?);
            sources.push(path.to_path_buf());
        }

        config.validate()?;
        tracing::debug!(sources = sources.len(), "Configuration loaded");
        Ok((config, sources))
    }

    /// Get the global config directory.
    ///
    /// On Unix systems, prefers `~/.config/ipokit` over the platform-specific
    /// directory for consistency with other CLI tools.
    pub fn global_config_dir() -> Option<PathBuf> {
        #[cfg(unix)]
        {
            if let Some(home) = dirs::home_dir() {
                let xdg_config = home.join(".config").join("ipokit");
                if xdg_config.exists() {
                    return Some(xdg_config);
                }
            }
        }

        dirs::config_dir().map(|d| d.join("ipokit"))
    }

    /// Load a single config file.
    pub async fn load_file(path: &Path) -> CoreResult<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| CoreError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        let content = Self::substitute_variables(&content)?;
        Self::parse_jsonc(&content, &path.display().to_string())
    }

    /// Reject values no widget can work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field, reason| Err(ConfigError::Validation { field, reason });
        if let Some(scroll) = &self.scroll {
            if scroll.item_height == Some(0) {
                return invalid("scroll.item_height", "must be at least 1");
            }
            if scroll.page_size == Some(0) {
                return invalid("scroll.page_size", "must be at least 1");
            }
        }
        if let Some(toast) = &self.toast {
            if toast.default_duration_ms == Some(0) {
                return invalid("toast.default_duration_ms", "must be positive");
            }
        }
        Ok(())
    }

    /// Parse JSONC (JSON with comments).
    pub fn parse_jsonc(content: &str, source: &str) -> CoreResult<Self> {
        let stripped = strip_comments(content);
        serde_json::from_str(&stripped).map_err(|e| {
            ConfigError::InvalidJson {
                source_name: source.to_string(),
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Replace `{env:VAR}` references with the variable's value.
    fn substitute_variables(content: &str) -> CoreResult<String> {
        let mut missing = None;
        let result = var_regex().replace_all(content, |caps: &regex::Captures<'_>| {
            let name = caps[1].trim();
            match std::env::var(name) {
                Ok(value) => value,
                Err(_) => {
                    missing.get_or_insert_with(|| name.to_string());
                    String::new()
                }
            }
        });

        match missing {
            Some(name) => Err(ConfigError::EnvVarNotFound { name }.into()),
            None => Ok(result.into_owned()),
        }
    }
}

/// Strip `//` and `/* */` comments outside of string literals.
fn strip_comments(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;
    let mut escape_next = false;

    while let Some(c) = chars.next() {
        if in_string {
            result.push(c);
            if escape_next {
                escape_next = false;
            } else if c == '\\' {
                escape_next = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match (c, chars.peek()) {
            ('"', _) => {
                in_string = true;
                result.push(c);
            }
            ('/', Some(&'/')) => {
                for c in chars.by_ref() {
                    if c == '\n' {
                        result.push('\n');
                        break;
                    }
                }
            }
            ('/', Some(&'*')) => {
                chars.next();
                let mut prev = ' ';
                for c in chars.by_ref() {
                    if prev == '*' && c == '/' {
                        break;
                    }
                    // Keep line numbers stable for error messages
                    if c == '\n' {
                        result.push('\n');
                    }
                    prev = c;
                }
            }
            _ => result.push(c),
        }
    }

    result
}

fn merge_option<T>(base: Option<T>, other: Option<T>) -> Option<T> {
    match (base, other) {
        (_, Some(o)) => Some(o),
        (b, None) => b,
    }
}

fn merge_section<T>(base: Option<T>, other: Option<T>, merge: impl FnOnce(T, T) -> T) -> Option<T> {
    match (base, other) {
        (Some(b), Some(o)) => Some(merge(b, o)),
        (b, None) => b,
        (None, o) => o,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_empty() {
        let config = Config::default();
        assert!(config.theme.is_none());
        assert!(config.countdown.is_none());
        assert_eq!(serde_json::to_string(&config).unwrap(), "{}");
    }

    #[test]
    fn test_strip_comments_keeps_strings() {
        let input = r#"{
            // line comment
            "theme": "a // not a comment", /* block */
            "faq": { "path": "/tmp/x/*y*/" }
        }"#;
        let config = Config::parse_jsonc(input, "test").unwrap();
        assert_eq!(config.theme.as_deref(), Some("a // not a comment"));
        assert_eq!(
            config.faq.unwrap().path,
            Some(PathBuf::from("/tmp/x/*y*/"))
        );
    }

    #[test]
    fn test_strip_comments_escaped_quote() {
        let input = r#"{ "theme": "say \"hi\" // still string" }"#;
        let config = Config::parse_jsonc(input, "test").unwrap();
        assert_eq!(config.theme.as_deref(), Some("say \"hi\" // still string"));
    }

    #[test]
    fn test_parse_invalid_json_reports_source() {
        let err = Config::parse_jsonc("{ not json", "broken.json").unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_merge_sections_fieldwise() {
        let base = Config::parse_jsonc(
            r#"{ "theme": "dark", "scroll": { "item_height": 3, "overscan": 2 } }"#,
            "base",
        )
        .unwrap();
        let over = Config::parse_jsonc(r#"{ "scroll": { "overscan": 5 } }"#, "over").unwrap();

        let merged = base.merge(over);
        let scroll = merged.scroll.unwrap();
        assert_eq!(merged.theme.as_deref(), Some("dark"));
        assert_eq!(scroll.item_height, Some(3));
        assert_eq!(scroll.overscan, Some(5));
    }

    #[test]
    fn test_countdown_target_parses_rfc3339() {
        let config = Config::parse_jsonc(
            r#"{ "countdown": { "target": "2025-06-30T15:00:00Z", "show_seconds": false } }"#,
            "test",
        )
        .unwrap();
        let countdown = config.countdown.unwrap();
        assert_eq!(
            countdown.target.unwrap().to_rfc3339(),
            "2025-06-30T15:00:00+00:00"
        );
        assert_eq!(countdown.show_seconds, Some(false));
    }

    #[test]
    fn test_validate_rejects_zero_item_height() {
        let config =
            Config::parse_jsonc(r#"{ "scroll": { "item_height": 0 } }"#, "test").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation { .. })
        ));
    }

    #[test]
    fn test_substitute_missing_env_var() {
        let err = Config::substitute_variables(r#"{ "theme": "{env:IPOKIT_TEST_SURELY_UNSET}" }"#)
            .unwrap_err();
        assert!(err.to_string().contains("IPOKIT_TEST_SURELY_UNSET"));
    }

    #[test]
    fn test_log_level_conversion() {
        let level: ipokit_util::log::LogLevel = LogLevel::Warn.into();
        assert_eq!(level, ipokit_util::log::LogLevel::Warn);
    }
}
