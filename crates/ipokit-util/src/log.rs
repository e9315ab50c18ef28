//! Logging setup using tracing.
//!
//! The interactive showcase owns the terminal, so logs normally go to a file
//! under the platform data directory. Non-interactive commands may print to
//! stderr instead. `RUST_LOG` overrides the configured level.

use std::fmt;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Mutex;
use tracing_subscriber::{fmt as tracing_fmt, prelude::*, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        })
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(format!("unknown log level '{other}'")),
        }
    }
}

/// Where and how much to log.
#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    pub level: LogLevel,
    /// Append to this file.
    pub file: Option<PathBuf>,
    /// Also write to stderr.
    pub stderr: bool,
    /// Include source file and line in stderr output.
    pub include_location: bool,
}

impl LogConfig {
    /// Log to `path` only.
    pub fn to_file(path: impl Into<PathBuf>) -> Self {
        Self {
            file: Some(path.into()),
            ..Self::default()
        }
    }

    /// Log to stderr only.
    pub fn to_stderr() -> Self {
        Self {
            stderr: true,
            ..Self::default()
        }
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    pub fn with_location(mut self, include: bool) -> Self {
        self.include_location = include;
        self
    }

    /// Whether any output is configured.
    pub fn is_enabled(&self) -> bool {
        self.stderr || self.file.is_some()
    }
}

/// Install the global subscriber.
///
/// Returns `false` if nothing is configured or a subscriber was already set.
pub fn init(config: LogConfig) -> bool {
    if !config.is_enabled() {
        return false;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.to_string()));

    let file_layer = config.file.as_deref().and_then(|path| {
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("Warning: could not create log directory: {e}");
                return None;
            }
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| eprintln!("Warning: could not open log file {}: {e}", path.display()))
            .ok()?;
        Some(
            tracing_fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
    });

    let stderr_layer = config.stderr.then(|| {
        tracing_fmt::layer()
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .is_ok()
}

/// `<data dir>/ipokit/logs/ipokit.log`.
pub fn default_log_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|p| p.join("ipokit").join("logs").join("ipokit.log"))
}

/// Debug span scoping the work done for one widget.
#[macro_export]
macro_rules! widget_span {
    ($name:expr) => {
        tracing::debug_span!("widget", name = $name)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_round_trips_through_str() {
        for level in [LogLevel::Trace, LogLevel::Warn, LogLevel::Error] {
            assert_eq!(level.to_string().parse::<LogLevel>(), Ok(level));
        }
        assert_eq!("WARNING".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_levels_order_by_severity() {
        assert!(LogLevel::Trace < LogLevel::Info);
        assert!(LogLevel::Warn < LogLevel::Error);
    }

    #[test]
    fn test_config_constructors() {
        assert!(!LogConfig::default().is_enabled());

        let file = LogConfig::to_file("/tmp/ipokit.log").with_level(LogLevel::Debug);
        assert!(file.is_enabled() && !file.stderr);
        assert_eq!(file.level, LogLevel::Debug);

        let stderr = LogConfig::to_stderr().with_location(true);
        assert!(stderr.stderr && stderr.include_location && stderr.file.is_none());
    }

    #[test]
    fn test_init_without_outputs_is_noop() {
        assert!(!init(LogConfig::default()));
    }

    #[test]
    fn test_default_log_path_ends_with_file_name() {
        if let Some(path) = default_log_path() {
            assert!(path.ends_with("ipokit/logs/ipokit.log"));
        }
    }
}
