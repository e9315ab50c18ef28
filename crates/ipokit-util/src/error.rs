//! Error type shared by the widget crates.
//!
//! Widgets treat bad runtime input as data (validation outcomes, clamped
//! values). This type covers the few construction-time failures left.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A validation pattern failed to compile.
    #[error("invalid pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: Box<regex::Error>,
    },
}

impl Error {
    pub fn pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::Pattern {
            pattern: pattern.into(),
            source: Box::new(source),
        }
    }
}

/// Compile `pattern`, naming it in the error.
pub fn compile_pattern(pattern: &str) -> Result<regex::Regex> {
    regex::Regex::new(pattern).map_err(|e| Error::pattern(pattern, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    #[test]
    fn test_compile_pattern() {
        assert!(compile_pattern(r"^\d{3}-\d{4}$").unwrap().is_match("100-0005"));
    }

    #[test]
    fn test_pattern_error_names_pattern() {
        let err = compile_pattern("(unclosed").unwrap_err();
        assert!(matches!(err, Error::Pattern { .. }));
        assert!(err.to_string().starts_with("invalid pattern `(unclosed`"));
        assert!(StdError::source(&err).is_some());
    }
}
