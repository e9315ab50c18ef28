//! Errors raised while loading configuration.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A config file exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Problems with the content of a configuration source.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid JSON/JSONC syntax.
    #[error("invalid config at {source_name}: {message}")]
    InvalidJson { source_name: String, message: String },

    /// A value no widget can work with.
    #[error("invalid config value `{field}`: {reason}")]
    Validation {
        field: &'static str,
        reason: &'static str,
    },

    /// The file passed with `--config` does not exist.
    #[error("config file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// `{env:NAME}` referenced an unset variable.
    #[error("environment variable not set: {name}")]
    EnvVarNotFound { name: String },
}

pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_is_transparent() {
        let err: CoreError = ConfigError::Validation {
            field: "scroll.page_size",
            reason: "must be at least 1",
        }
        .into();
        assert_eq!(
            err.to_string(),
            "invalid config value `scroll.page_size`: must be at least 1"
        );
    }

    #[test]
    fn test_read_error_names_path() {
        let err = CoreError::Read {
            path: PathBuf::from("/etc/ipokit/config.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("/etc/ipokit/config.json"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
